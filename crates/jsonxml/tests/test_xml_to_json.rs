use jsonxml::{Result, XmlError, convert_from_xml, from_xml_str};

fn xml_to_json(xml: &str) -> Result<String> {
    let root = from_xml_str(xml)?;
    let json = convert_from_xml(&root);
    println!("{xml}\n  -> {json}");
    Ok(json)
}

#[test]
fn test_root_values() -> Result<()> {
    assert_eq!(xml_to_json("<Root/>")?, "null");
    assert_eq!(xml_to_json("<Root></Root>")?, "null");
    assert_eq!(xml_to_json("<Root>Contents</Root>")?, "\"Contents\"");
    Ok(())
}

#[test]
fn test_nullable_attribute() -> Result<()> {
    let xml = concat!(
        r#"<Root xmlns:json="http://www.integround.com/json">"#,
        r#"<E1/><E2 json:Nullable="false"/><E3 json:Nullable="false"></E3>"#,
        r#"<E4 json:Nullable="true"/><E5 json:Nullable="true"></E5></Root>"#
    );
    assert_eq!(
        xml_to_json(xml)?,
        r#"{"E1":null,"E2":"","E3":"","E4":null,"E5":null}"#
    );
    Ok(())
}

#[test]
fn test_same_named_siblings_become_an_array() -> Result<()> {
    assert_eq!(
        xml_to_json("<Root><P1>10</P1><P1>20</P1><P1><E1>10</E1><E2/></P1></Root>")?,
        r#"{"P1":["10","20",{"E1":"10","E2":null}]}"#
    );
    assert_eq!(
        xml_to_json("<Root><Prop><P1>10</P1><P1>20</P1><P1>30</P1></Prop></Root>")?,
        r#"{"Prop":{"P1":["10","20","30"]}}"#
    );
    Ok(())
}

#[test]
fn test_single_child_is_not_an_array() -> Result<()> {
    assert_eq!(xml_to_json("<Root><P1>10</P1></Root>")?, r#"{"P1":"10"}"#);
    Ok(())
}

#[test]
fn test_indented_markup_reads_like_compact_markup() -> Result<()> {
    let indented = r#"
        <Json xmlns:json="http://www.integround.com/json">
            <Name>Widget</Name>
            <Price json:ValueType="Number">9.99</Price>
            <Tags json:ValueType="Array">
                <Value>a</Value>
                <Value>b</Value>
            </Tags>
            <Spec json:ValueType="Object" />
        </Json>
    "#;
    assert_eq!(
        xml_to_json(indented)?,
        r#"{"Name":"Widget","Price":9.99,"Tags":["a","b"],"Spec":{}}"#
    );
    Ok(())
}

#[test]
fn test_foreign_attributes_and_namespaces() -> Result<()> {
    let xml = concat!(
        r#"<order xmlns="urn:orders" xmlns:x="urn:x" id="7" x:ref="a&amp;b">"#,
        r#"<line qty="2">Bolt</line><note>fragile</note></order>"#
    );
    assert_eq!(
        xml_to_json(xml)?,
        concat!(
            r#"{"@xmlns":"urn:orders","@xmlns:x":"urn:x","@id":"7","@x:ref":"a&b","#,
            r##""line":{"@qty":"2","#text":"Bolt"},"note":"fragile"}"##
        )
    );
    Ok(())
}

#[test]
fn test_text_escaping() -> Result<()> {
    assert_eq!(
        xml_to_json("<Root><P>a \"quoted\" \\ path\ttab</P><Q>&lt;&#10;&gt;</Q></Root>")?,
        r#"{"P":"a \"quoted\" \\ path\ttab","Q":"<\n>"}"#
    );
    Ok(())
}

#[test]
fn test_cdata_and_comments() -> Result<()> {
    assert_eq!(
        xml_to_json("<Root><!-- skipped --><P><![CDATA[<raw> & text]]></P></Root>")?,
        r#"{"P":"<raw> & text"}"#
    );
    Ok(())
}

#[test]
fn test_deeply_nested_markup_is_rejected() -> Result<()> {
    let shallow = format!("{}x{}", "<a>".repeat(300), "</a>".repeat(300));
    let json = xml_to_json(&shallow)?;
    assert!(json.ends_with(r#""x"}}"#));

    let deep = format!("{}{}", "<a>".repeat(100_000), "</a>".repeat(100_000));
    assert!(matches!(from_xml_str(&deep), Err(XmlError::Malformed(_))));
    Ok(())
}
