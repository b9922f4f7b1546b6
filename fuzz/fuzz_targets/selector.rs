#![no_main]

use dom::{Document, SelectorList};
use libfuzzer_sys::fuzz_target;

fn sample() -> Document {
    let mut doc = Document::with_body();
    let Some(body) = doc.body() else {
        return doc;
    };
    let mask = doc.create_element("div");
    let _ = doc.set_attr(mask, "class", "modal-mask dark");
    let _ = doc.append_child(body, mask);
    let popup = doc.create_element("section");
    let _ = doc.set_attr(popup, "id", "menu");
    let _ = doc.set_attr(popup, "eagle-popup", "popup");
    let _ = doc.append_child(mask, popup);
    doc
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let doc = sample();
    if let Some(list) = SelectorList::parse(input) {
        assert!(!list.selectors().is_empty());
        let hits = doc.query_selector_all_in(doc.root(), &list);
        assert_eq!(hits.first().copied(), doc.query_selector_in(doc.root(), &list));
        assert_eq!(doc.query_selector(input), hits.first().copied());
    } else {
        assert_eq!(doc.query_selector(input), None);
    }
});
