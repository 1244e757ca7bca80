//! Tree query capability over a parsed HTML document
//!
//! The extractor only needs a handful of structural queries (find by tag,
//! class or id, step to the next sibling element, read text). Keeping them
//! behind [`DomNode`] lets the extraction logic run against any DOM-like
//! parser; the crate ships an implementation for [`scraper::ElementRef`].

use scraper::ElementRef;

/// An element handle inside a parsed document
pub trait DomNode: Copy {
    /// Lowercase tag name, e.g. `td`
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_class(&self, class: &str) -> bool;

    /// All descendant elements in document order, excluding `self`
    fn elements(&self) -> Vec<Self>;

    /// The next sibling that is an element, skipping text and comments
    fn next_element(&self) -> Option<Self>;

    /// Concatenated text of the element and all its descendants
    fn text_content(&self) -> String;

    /// Text of the first child node, if that child carries any text
    fn leading_text(&self) -> Option<String>;

    fn find(&self, tag: &str) -> Option<Self> {
        self.elements().into_iter().find(|e| e.tag_name() == tag)
    }

    fn find_all(&self, tag: &str) -> Vec<Self> {
        self.elements()
            .into_iter()
            .filter(|e| e.tag_name() == tag)
            .collect()
    }

    fn find_by_class(&self, tag: &str, class: &str) -> Option<Self> {
        self.elements()
            .into_iter()
            .find(|e| e.tag_name() == tag && e.has_class(class))
    }

    fn find_all_by_class(&self, tag: &str, class: &str) -> Vec<Self> {
        self.elements()
            .into_iter()
            .filter(|e| e.tag_name() == tag && e.has_class(class))
            .collect()
    }

    fn find_by_id(&self, tag: &str, id: &str) -> Option<Self> {
        self.elements()
            .into_iter()
            .find(|e| e.tag_name() == tag && e.attribute("id") == Some(id))
    }
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn elements(&self) -> Vec<Self> {
        self.descendants().skip(1).filter_map(ElementRef::wrap).collect()
    }

    fn next_element(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn leading_text(&self) -> Option<String> {
        let first = self.first_child()?;
        if let Some(text) = first.value().as_text() {
            return Some(String::from(&**text));
        }
        ElementRef::wrap(first).map(|e| e.text().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PAGE: &str = r#"<html><body>
        <div id="main">
            <p class="lead intro">Hello <b>there</b></p>
            <table><tr><td class="a">one</td> <td class="b">two</td><td class="c">three</td></tr></table>
        </div>
    </body></html>"#;

    #[test]
    fn test_find_by_id_and_class() {
        let document = Html::parse_document(PAGE);
        let root = document.root_element();

        let main = root.find_by_id("div", "main").unwrap();
        let lead = main.find_by_class("p", "intro").unwrap();
        assert!(lead.has_class("lead"));
        assert_eq!(lead.text_content(), "Hello there");
        assert!(main.find_by_class("p", "missing").is_none());
    }

    #[test]
    fn test_find_all_through_implied_tbody() {
        let document = Html::parse_document(PAGE);
        let table = document.root_element().find("table").unwrap();

        assert_eq!(table.find_all("td").len(), 3);
        assert_eq!(table.find_all_by_class("td", "b").len(), 1);
    }

    #[test]
    fn test_next_element_skips_whitespace() {
        let document = Html::parse_document(PAGE);
        let first = document.root_element().find_by_class("td", "a").unwrap();

        let second = first.next_element().unwrap();
        assert_eq!(second.text_content(), "two");
        let third = second.next_element().unwrap();
        assert_eq!(third.text_content(), "three");
        assert!(third.next_element().is_none());
    }

    #[test]
    fn test_leading_text() {
        let document = Html::parse_document(PAGE);
        let lead = document.root_element().find("p").unwrap();
        assert_eq!(lead.leading_text(), Some("Hello ".to_string()));
    }
}
