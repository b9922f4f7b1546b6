use super::*;
use proptest::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn elem(doc: &mut Document, parent: Id, name: &str, attributes: &[(&str, &str)]) -> Id {
    let id = doc.create_element(name);
    for (k, v) in attributes {
        doc.set_attr(id, k, v).unwrap();
    }
    doc.append_child(parent, id).unwrap();
    id
}

fn body(doc: &Document) -> Id {
    doc.body().expect("skeleton has a body")
}

#[test]
fn skeleton_has_html_and_body() {
    let doc = Document::with_body();
    let body = body(&doc);
    let html = doc.parent(body).unwrap();
    assert_eq!(doc.tag_name(html), Some("html"));
    assert_eq!(doc.parent(html), Some(doc.root()));
    assert_eq!(doc.len(), 3);
}

#[test]
fn body_lookup_follows_tree_changes() {
    let mut doc = Document::new();
    assert_eq!(doc.body(), None);
    let html = doc.create_element("html");
    doc.append_child(doc.root(), html).unwrap();
    let body = doc.create_element("BODY");
    assert_eq!(doc.body(), None);
    doc.append_child(html, body).unwrap();
    assert_eq!(doc.body(), Some(body));
    assert_eq!(doc.body(), Some(body));

    let late = doc.create_element("body");
    doc.append_child(html, late).unwrap();
    assert_eq!(doc.body(), Some(body));
}

#[test]
fn attributes_are_case_insensitive_and_overwrite() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let div = elem(&mut doc, b, "DIV", &[("Popup-Action", "open")]);
    assert_eq!(doc.tag_name(div), Some("div"));
    assert_eq!(doc.attr(div, "popup-action"), Some("open"));
    doc.set_attr(div, "POPUP-ACTION", "close").unwrap();
    assert_eq!(doc.attributes(div).len(), 1);
    assert_eq!(doc.attr(div, "popup-action"), Some("close"));
    assert_eq!(doc.remove_attr(div, "popup-action"), Ok(true));
    assert_eq!(doc.remove_attr(div, "popup-action"), Ok(false));
    assert!(!doc.has_attr(div, "popup-action"));
}

#[test]
fn attribute_writes_reject_non_elements() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let text = doc.create_text("hello");
    doc.append_child(b, text).unwrap();
    assert_eq!(doc.set_attr(text, "x", "y"), Err(DomError::WrongNodeKind(text)));
    assert_eq!(doc.set_attr(Id(999), "x", "y"), Err(DomError::UnknownNode(Id(999))));
    assert_eq!(doc.attr(text, "x"), None);
}

#[test]
fn append_rejects_cycles_and_reparenting() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let outer = elem(&mut doc, b, "div", &[]);
    let inner = elem(&mut doc, outer, "div", &[]);
    assert_eq!(
        doc.append_child(inner, outer),
        Err(DomError::CycleDetected {
            parent: inner,
            child: outer
        })
    );
    assert_eq!(doc.append_child(b, inner), Err(DomError::InvalidParent(inner)));
    let text = doc.create_text("t");
    doc.append_child(b, text).unwrap();
    let orphan = doc.create_element("span");
    assert_eq!(doc.append_child(text, orphan), Err(DomError::InvalidParent(text)));
}

#[test]
fn ancestors_are_inclusive_and_end_at_document() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let outer = elem(&mut doc, b, "div", &[]);
    let inner = elem(&mut doc, outer, "span", &[]);
    let chain: Vec<Id> = doc.ancestors(inner).collect();
    assert_eq!(chain.first(), Some(&inner));
    assert_eq!(chain[1], outer);
    assert_eq!(chain[2], b);
    assert_eq!(chain.last(), Some(&doc.root()));
    assert_eq!(doc.ancestors(Id(4242)).count(), 0);
}

#[test]
fn query_is_document_order_and_excludes_scope() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let mask = elem(&mut doc, b, "div", &[("class", "modal-mask"), ("id", "m")]);
    let a = elem(&mut doc, mask, "div", &[("eagle-popup", "popup"), ("id", "a")]);
    let nested = elem(&mut doc, a, "div", &[("eagle-popup", "popup")]);
    let c = elem(&mut doc, mask, "div", &[("eagle-popup", "popup")]);

    let open = SelectorList::parse("[eagle-popup=popup]").unwrap();
    assert_eq!(doc.query_selector_all_in(mask, &open), vec![a, nested, c]);
    assert_eq!(doc.query_selector_in(a, &open), Some(nested));

    let masks = SelectorList::parse(".modal-mask").unwrap();
    assert!(doc.query_selector_all_in(mask, &masks).is_empty());

    assert_eq!(doc.query_selector("#a"), Some(a));
    assert_eq!(doc.query_selector("#missing"), None);
    assert_eq!(doc.query_selector("div > div"), None);
}

#[test]
fn contains_is_inclusive() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let outer = elem(&mut doc, b, "div", &[]);
    let inner = elem(&mut doc, outer, "div", &[]);
    assert!(doc.contains(outer, inner));
    assert!(doc.contains(inner, inner));
    assert!(!doc.contains(inner, outer));
}

#[test]
fn non_bubbling_event_reaches_only_target() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let outer = elem(&mut doc, b, "div", &[]);
    let inner = elem(&mut doc, outer, "div", &[]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    for node in [outer, inner] {
        let seen = Rc::clone(&seen);
        doc.add_listener(node, "popupopen", move |event| {
            seen.borrow_mut().push(event.current_target());
        });
    }
    assert!(doc.dispatch_event(inner, "popupopen", EventInit::default()));
    assert_eq!(*seen.borrow(), vec![inner]);

    seen.borrow_mut().clear();
    let init = EventInit {
        bubbles: true,
        cancelable: true,
    };
    assert!(doc.dispatch_event(inner, "popupopen", init));
    assert_eq!(*seen.borrow(), vec![inner, outer]);
}

#[test]
fn prevent_default_cancels_only_cancelable_events() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let el = elem(&mut doc, b, "div", &[]);
    let listener = doc.add_listener(el, "popupclose", |event| event.prevent_default());
    assert!(!doc.dispatch_event(el, "popupclose", EventInit::default()));
    let init = EventInit {
        bubbles: false,
        cancelable: false,
    };
    assert!(doc.dispatch_event(el, "popupclose", init));
    assert!(doc.remove_listener(listener));
    assert!(!doc.remove_listener(listener));
    assert!(doc.dispatch_event(el, "popupclose", EventInit::default()));
}

#[test]
fn stop_propagation_halts_bubbling() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    let outer = elem(&mut doc, b, "div", &[]);
    let inner = elem(&mut doc, outer, "div", &[]);
    let outer_hits = Rc::new(Cell::new(0));
    let hits = Rc::clone(&outer_hits);
    doc.add_listener(outer, "ping", move |_| hits.set(hits.get() + 1));
    doc.add_listener(inner, "ping", |event| event.stop_propagation());
    let init = EventInit {
        bubbles: true,
        cancelable: true,
    };
    doc.dispatch_event(inner, "ping", init);
    assert_eq!(outer_hits.get(), 0);
}

#[test]
fn extensions_are_keyed_by_type() {
    let mut doc = Document::new();
    assert!(doc.extension::<RefCell<Vec<u32>>>().is_none());
    let shared = Rc::new(RefCell::new(vec![1u32]));
    assert!(doc.insert_extension(Rc::clone(&shared)).is_none());
    let found = doc.extension::<RefCell<Vec<u32>>>().unwrap();
    assert!(Rc::ptr_eq(&found, &shared));
    assert!(doc.extension::<String>().is_none());
}

#[test]
fn outline_lists_attributes() {
    let mut doc = Document::with_body();
    let b = body(&doc);
    elem(&mut doc, b, "div", &[("id", "a"), ("eagle-popup", "")]);
    let lines = debug::outline(&doc, 16);
    assert_eq!(lines[0], "#document");
    assert_eq!(lines[3], r#"      <div id="a" eagle-popup="">"#);
}

proptest! {
    #[test]
    fn contains_agrees_with_ancestors(parents in prop::collection::vec(0usize..1000, 1..40)) {
        let mut doc = Document::with_body();
        let mut nodes = vec![body(&doc)];
        for pick in parents {
            let parent = nodes[pick % nodes.len()];
            let child = doc.create_element("div");
            doc.append_child(parent, child).unwrap();
            nodes.push(child);
        }
        for &a in &nodes {
            for &b in &nodes {
                let via_walk = doc.ancestors(b).any(|x| x == a);
                prop_assert_eq!(doc.contains(a, b), via_walk);
            }
        }
    }
}
