// Binds a book search response into declared records

use picobind::{from_str_with_options, record, BindError, BindOptions, MismatchPolicy, Record};

record! {
    #[derive(Debug, Default)]
    pub struct VolumeInfo {
        pub title: String,
        pub authors: Vec<String>,
        pub published: String as "publishedDate",
        pub page_count: Option<u32> as "pageCount",
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Volume {
        pub id: String,
        pub volume_info: VolumeInfo as "volumeInfo",
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Response {
        pub kind: String,
        pub total_items: i64 as "totalItems",
        pub items: Vec<Volume>,
    }
}

const RESPONSE: &str = r#"{
  "kind": "books#volumes",
  "totalItems": 2,
  "items": [
    {
      "id": "yZ1APgAACAAJ",
      "etag": "Xo9y6Hbs1Lc",
      "volumeInfo": {
        "title": "Processing",
        "authors": ["Casey Reas", "Ben Fry"],
        "publishedDate": "2007",
        "pageCount": 710,
        "industryIdentifiers": [{"type": "ISBN_10", "identifier": "0262182629"}]
      },
      "saleInfo": {"country": "US", "isEbook": false}
    },
    {
      "id": "b2wQAQAAIAAJ",
      "volumeInfo": {
        "title": "Visualizing Data",
        "authors": ["Ben Fry"],
        "publishedDate": "2008",
        "pageCount": "unknown"
      }
    }
  ]
}"#;

fn main() -> Result<(), BindError> {
    println!("Declared fields of {}:", Response::type_name());
    for field in Response::fields() {
        println!("  {:<12} {}", field.name, field.declared);
    }
    println!();

    // The second volume has a non-numeric pageCount; skip it rather than fail.
    let options = BindOptions::new().with_mismatch_policy(MismatchPolicy::Skip);
    let Some(response) = from_str_with_options::<Response>(RESPONSE, options)? else {
        println!("Empty document");
        return Ok(());
    };

    println!("{} ({} items)", response.kind, response.total_items);
    for volume in &response.items {
        let info = &volume.volume_info;
        let pages = match info.page_count {
            Some(pages) => pages.to_string(),
            None => String::from("?"),
        };
        println!(
            "  [{}] {} by {} ({}, {} pages)",
            volume.id,
            info.title,
            info.authors.join(", "),
            info.published,
            pages
        );
    }

    // Under the default policy the same document is rejected with a path.
    if let Err(e) = picobind::from_str::<Response>(RESPONSE) {
        println!();
        println!("Strict binding fails: {e}");
    }
    Ok(())
}
