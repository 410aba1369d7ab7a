mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by key in the tree.
pub fn find_element<'a>(root: &'a Element, key: &str) -> Option<&'a Element> {
    if root.key == key {
        return Some(root);
    }

    for child in root.content.children() {
        if let Some(found) = find_element(child, key) {
            return Some(found);
        }
    }

    None
}

/// Find an element by key in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, key: &str) -> Option<&'a mut Element> {
    if root.key == key {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, key) {
                return Some(found);
            }
        }
    }

    None
}

/// Chain of elements from `root` down to the element with `key`, inclusive.
/// Returns None if the key is not in the tree.
pub fn element_path<'a>(root: &'a Element, key: &str) -> Option<Vec<&'a Element>> {
    let mut path = vec![root];
    if collect_path(root, key, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn collect_path<'a>(element: &'a Element, key: &str, path: &mut Vec<&'a Element>) -> bool {
    if element.key == key {
        return true;
    }

    for child in element.content.children() {
        path.push(child);
        if collect_path(child, key, path) {
            return true;
        }
        path.pop();
    }

    false
}
