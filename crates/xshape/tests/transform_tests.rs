use xshape::{
    channel_ids, concatenation_string, create_hierarchy, customers_from_csv, flatten_string,
    orders_value, parse_document, purchase_orders, replace_customers_with_contacts,
    sort_customers,
};

#[test]
fn test_create_hierarchy_partitions_by_category() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root>\
        <Data><Category>Fruit</Category><Quantity>10</Quantity><Price>2.5</Price></Data>\
        <Data><Category>Tools</Category><Quantity>1</Quantity><Price>9.0</Price></Data>\
        <Data><Category>Fruit</Category><Quantity>3</Quantity><Price>0.5</Price></Data>\
        </Root>";
    let output = create_hierarchy(input)?;

    let doc = parse_document(&output)?;
    let groups: Vec<&xshape::Element> = doc.root.elements().collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups.first().and_then(|g| g.attr("ID")), Some("Fruit"));
    assert_eq!(groups.last().and_then(|g| g.attr("ID")), Some("Tools"));
    assert_eq!(
        groups.first().map(|g| g.children_named("Data").count()),
        Some(2)
    );
    assert!(!output.contains("Category"));
    Ok(())
}

#[test]
fn test_purchase_orders_spec_example() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<aw:PurchaseOrders xmlns:aw=\"http://www.adventure-works.com\">\
        <aw:PurchaseOrder aw:PurchaseOrderNumber=\"99301\">\
        <aw:Address aw:Type=\"Shipping\"><aw:State>NY</aw:State></aw:Address>\
        </aw:PurchaseOrder>\
        <aw:PurchaseOrder aw:PurchaseOrderNumber=\"99505\">\
        <aw:Address aw:Type=\"Shipping\"><aw:State>WA</aw:State></aw:Address>\
        </aw:PurchaseOrder>\
        <aw:PurchaseOrder aw:PurchaseOrderNumber=\"99189\">\
        <aw:Address aw:Type=\"Shipping\"><aw:State>NY</aw:State></aw:Address>\
        </aw:PurchaseOrder>\
        <aw:PurchaseOrder aw:PurchaseOrderNumber=\"99110\">\
        <aw:Address aw:Type=\"Shipping\"><aw:State>NY</aw:State></aw:Address>\
        </aw:PurchaseOrder>\
        </aw:PurchaseOrders>";
    assert_eq!(purchase_orders(input)?, "99301,99189,99110");
    Ok(())
}

#[test]
fn test_customers_from_csv_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let tokens = [
        "GREAL",
        "Great Lakes Food Market",
        "Howard Snyder",
        "Marketing Manager",
        "(503) 555-7555",
        "2732 Baker Blvd.",
        "Eugene",
        "OR",
        "97403",
        "USA",
    ];
    let output = customers_from_csv(&tokens.join(","))?;

    let doc = parse_document(&output)?;
    let customer = doc
        .root
        .child("Customer")
        .ok_or("missing Customer element")?;
    let address = customer
        .child("FullAddress")
        .ok_or("missing FullAddress element")?;

    let extracted = [
        customer.attr("CustomerID").unwrap_or_default().to_string(),
        customer.child("CompanyName").map(|e| e.text()).unwrap_or_default(),
        customer.child("ContactName").map(|e| e.text()).unwrap_or_default(),
        customer.child("ContactTitle").map(|e| e.text()).unwrap_or_default(),
        customer.child("Phone").map(|e| e.text()).unwrap_or_default(),
        address.child("Address").map(|e| e.text()).unwrap_or_default(),
        address.child("City").map(|e| e.text()).unwrap_or_default(),
        address.child("Region").map(|e| e.text()).unwrap_or_default(),
        address.child("PostalCode").map(|e| e.text()).unwrap_or_default(),
        address.child("Country").map(|e| e.text()).unwrap_or_default(),
    ];
    assert_eq!(extracted.as_slice(), tokens.map(String::from).as_slice());
    Ok(())
}

#[test]
fn test_concatenation_string_spec_example() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root><Sentence><Word>Hello</Word><Punctuation>,</Punctuation>\
                 <Word>world</Word></Sentence></Root>";
    assert_eq!(concatenation_string(input)?, "Hello,world");
    Ok(())
}

#[test]
fn test_replace_customers_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root>\
        <customer id=\"1\"><name>Ann</name><city>Oslo</city></customer>\
        <customer id=\"2\"><name>Bob</name></customer>\
        </Root>";
    let once = replace_customers_with_contacts(input)?;
    let twice = replace_customers_with_contacts(&once)?;

    assert_eq!(once, twice);
    assert_eq!(
        once,
        "<Root>\
         <contact><name>Ann</name><city>Oslo</city></contact>\
         <contact><name>Bob</name></contact>\
         </Root>"
    );
    Ok(())
}

#[test]
fn test_channel_ids_selection_table() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root>\
        <channel id=\"1\"><subscriber/><subscriber/><!--DELETE--></channel>\
        <channel id=\"2\"><subscriber/><subscriber/><subscriber/></channel>\
        <channel id=\"3\"><subscriber/><!--DELETE--></channel>\
        </Root>";
    let ids: Vec<i32> = channel_ids(input)?.collect();
    assert_eq!(ids, vec![1]);
    Ok(())
}

#[test]
fn test_sort_customers_orders_by_country_then_city() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root>\
        <Customer CustomerID=\"3\"><FullAddress><City>Warszawa</City>\
        <Country>Poland</Country></FullAddress></Customer>\
        <Customer CustomerID=\"1\"><FullAddress><City>Graz</City>\
        <Country>Austria</Country></FullAddress></Customer>\
        <Customer CustomerID=\"2\"><FullAddress><City>Salzburg</City>\
        <Country>Austria</Country></FullAddress></Customer>\
        </Root>";
    let output = sort_customers(input)?;

    let doc = parse_document(&output)?;
    let ids: Vec<&str> = doc
        .root
        .elements()
        .filter_map(|e| e.attr("CustomerID"))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    Ok(())
}

#[test]
fn test_flatten_string_example() -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_document("<root><element>something</element></root>")?;
    assert_eq!(flatten_string(&doc.root), "something");
    Ok(())
}

#[test]
fn test_orders_value_spec_example() -> Result<(), Box<dyn std::error::Error>> {
    let input = "<Root>\
        <Orders>\
        <Order><product>A</product></Order>\
        <Order><product>A</product></Order>\
        <Order><product>B</product></Order>\
        </Orders>\
        <products>\
        <product Id=\"A\" Value=\"3\"/>\
        <product Id=\"B\" Value=\"5\"/>\
        </products>\
        </Root>";
    assert_eq!(orders_value(input)?, 11);
    Ok(())
}
