use super::components;
use shadow_query::dom::{Document, NodeId};
use shadow_query::selector::SelectorError;
use shadow_query::{find_all, find_first, flatten, Depth, QueryOptions, Shadow, ShadowTree};
use std::collections::HashSet;
use std::convert::Infallible;

fn id(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id)
        .unwrap_or_else(|| panic!("fixture has no #{id}"))
}

fn depth(levels: u32) -> QueryOptions {
    QueryOptions::default().with_depth(Depth::limited(levels).unwrap())
}

#[test]
fn finds_inside_nested_shadow_roots() {
    let doc = components();
    let found = find_all(&doc, doc.root(), "button", &QueryOptions::default()).unwrap();
    assert_eq!(found, vec![id(&doc, "deep")]);

    let primary = find_first(&doc, doc.root(), ".primary", &QueryOptions::default()).unwrap();
    assert_eq!(primary, Some(id(&doc, "deep")));
}

#[test]
fn depth_limits_boundary_crossings() {
    let doc = components();

    let shallow = find_all(&doc, doc.root(), "slot, button", &depth(1)).unwrap();
    let names: Vec<_> = shallow.iter().filter_map(|&n| doc.tag_name(n)).collect();
    assert_eq!(names, ["slot"]);

    let deeper = find_all(&doc, doc.root(), "slot, button", &depth(2)).unwrap();
    assert_eq!(deeper.len(), 2);
    assert!(deeper.contains(&id(&doc, "deep")));
}

#[test]
fn container_shadow_root_counts_against_depth() {
    let doc = Document::parse(
        r#"<x-app id="app">
             <template shadowrootmode="open">
               <x-inner>
                 <template shadowrootmode="open">
                   <b id="two"/>
                   <x-deeper>
                     <template shadowrootmode="open"><i id="three"/></template>
                   </x-deeper>
                 </template>
               </x-inner>
             </template>
           </x-app>"#,
    )
    .unwrap();
    let app = id(&doc, "app");

    let found = find_all(&doc, app, "x-inner, b, i", &depth(1)).unwrap();
    let names: Vec<_> = found.iter().filter_map(|&n| doc.tag_name(n)).collect();
    assert_eq!(names, ["x-inner"]);

    let found = find_all(&doc, app, "b, i", &depth(2)).unwrap();
    assert_eq!(found, vec![id(&doc, "two")]);

    let found = find_all(&doc, app, "b, i", &QueryOptions::default()).unwrap();
    assert_eq!(found, vec![id(&doc, "two"), id(&doc, "three")]);
}

#[test]
fn closed_shadow_roots_are_opaque_at_any_depth() {
    let doc = components();
    for options in [QueryOptions::default(), depth(1), depth(10)] {
        assert!(find_all(&doc, doc.root(), "#hidden", &options)
            .unwrap()
            .is_empty());
        assert!(find_all(&doc, doc.root(), "input", &options)
            .unwrap()
            .is_empty());
    }

    // the host itself is ordinary content
    let secret = find_all(&doc, doc.root(), "secret-box", &QueryOptions::default()).unwrap();
    assert_eq!(secret, vec![id(&doc, "secret")]);
}

#[test]
fn container_is_included_when_it_matches() {
    let doc = components();
    let host = id(&doc, "host");

    let all = find_all(&doc, host, "*", &QueryOptions::default()).unwrap();
    assert_eq!(all[0], host);
    assert!(all.contains(&id(&doc, "outer")));
    assert!(all.contains(&id(&doc, "inner")));
    assert!(all.contains(&id(&doc, "deep")));

    let divs = find_all(&doc, host, "div", &QueryOptions::default()).unwrap();
    assert!(!divs.contains(&host));
}

#[test]
fn whole_document_root_is_normalized() {
    let doc = components();
    let html = doc.document_element(doc.root()).unwrap();

    let all = find_all(&doc, doc.root(), "*", &QueryOptions::default()).unwrap();
    assert_eq!(all[0], html);
    assert_eq!(all.iter().filter(|&&n| n == html).count(), 1);
    assert_eq!(
        all,
        find_all(&doc, html, "*", &QueryOptions::default()).unwrap()
    );
}

#[test]
fn shadow_root_as_container() {
    let doc = components();
    let root = doc.shadow_root(id(&doc, "host")).unwrap();

    let all = find_all(&doc, root, "*", &QueryOptions::default()).unwrap();
    assert!(!all.contains(&root));
    assert!(all.contains(&id(&doc, "deep")));
    assert!(!all.contains(&id(&doc, "outer")));
}

#[test]
fn selectors_do_not_combine_across_boundaries() {
    let doc = components();
    let found = find_all(&doc, doc.root(), "my-element div", &QueryOptions::default()).unwrap();
    assert_eq!(found, vec![id(&doc, "outer")]);
    assert!(find_all(&doc, doc.root(), "nested-el > button", &QueryOptions::default())
        .unwrap()
        .is_empty());
}

#[test]
fn results_are_unique_and_repeatable() {
    let doc = components();
    let first = find_all(&doc, doc.root(), "*", &QueryOptions::default()).unwrap();
    let second = find_all(&doc, doc.root(), "*", &QueryOptions::default()).unwrap();
    assert_eq!(first, second);

    let unique: HashSet<_> = first.iter().collect();
    assert_eq!(unique.len(), first.len());
}

#[test]
fn find_first_in_light_tree_is_document_order() {
    let doc = components();
    let li = find_first(&doc, doc.root(), "li", &QueryOptions::default()).unwrap();
    assert_eq!(li, Some(id(&doc, "first")));
    let none = find_first(&doc, doc.root(), "table", &QueryOptions::default()).unwrap();
    assert_eq!(none, None);
}

#[test]
fn flatten_lists_open_roots_but_not_closed_ones() {
    let doc = components();
    let flat = flatten(&doc, doc.root(), &QueryOptions::default()).unwrap();

    let host_root = doc.shadow_root(id(&doc, "host")).unwrap();
    let nested_root = doc.shadow_root(id(&doc, "nested")).unwrap();
    let secret_root = doc.shadow_root(id(&doc, "secret")).unwrap();
    assert!(flat.contains(&host_root));
    assert!(flat.contains(&nested_root));
    assert!(!flat.contains(&secret_root));
    assert!(!flat.contains(&id(&doc, "hidden")));
}

#[test]
fn malformed_selector_is_passed_through() {
    let doc = components();
    let err = find_all(&doc, doc.root(), "li >", &QueryOptions::default()).unwrap_err();
    assert_eq!(err, SelectorError::DanglingCombinator { position: 3 });
}

/// A host that is not a `Document`: tags only, shadow roots as extra nodes.
struct ToyTree {
    nodes: Vec<Toy>,
}

struct Toy {
    tag: &'static str,
    children: Vec<usize>,
    shadow: Option<(bool, usize)>,
}

impl ToyTree {
    fn walk(&self, anchor: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[anchor].children {
            out.push(child);
            self.walk(child, out);
        }
    }
}

impl ShadowTree for ToyTree {
    type Node = usize;
    type Error = Infallible;

    fn query_local(&self, anchor: usize, selector: &str) -> Result<Vec<usize>, Infallible> {
        let mut all = Vec::new();
        self.walk(anchor, &mut all);
        Ok(all
            .into_iter()
            .filter(|&n| selector == "*" || self.nodes[n].tag == selector)
            .collect())
    }

    fn matches(&self, node: usize, selector: &str) -> Result<bool, Infallible> {
        let tag = self.nodes[node].tag;
        Ok(tag != "#root" && (selector == "*" || tag == selector))
    }

    fn shadow(&self, node: usize) -> Shadow<usize> {
        match self.nodes[node].shadow {
            None => Shadow::None,
            Some((true, root)) => Shadow::Open(root),
            Some((false, _)) => Shadow::Closed,
        }
    }

    fn document_element(&self, _node: usize) -> Option<usize> {
        None
    }
}

#[test]
fn works_with_any_host_tree() {
    // 0 <app> hosts open root 1 holding 2 <btn>, which hosts closed root 3 holding 4 <btn>
    let tree = ToyTree {
        nodes: vec![
            Toy { tag: "app", children: vec![], shadow: Some((true, 1)) },
            Toy { tag: "#root", children: vec![2], shadow: None },
            Toy { tag: "btn", children: vec![], shadow: Some((false, 3)) },
            Toy { tag: "#root", children: vec![4], shadow: None },
            Toy { tag: "btn", children: vec![], shadow: None },
        ],
    };

    let found = find_all(&tree, 0, "btn", &QueryOptions::default()).unwrap();
    assert_eq!(found, vec![2]);
    let all = find_all(&tree, 0, "*", &QueryOptions::default()).unwrap();
    assert_eq!(all, vec![0, 2]);
}
