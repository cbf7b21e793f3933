use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmlError;

/// One value, or several values sharing the same element name.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    fn push(self, value: T) -> Self {
        let mut values = self.into_vec();
        values.push(value);
        OneOrMany::Many(values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Text(String),
    Element(XmlElement),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub attributes: Vec<(String, String)>,
    pub children: Vec<(String, OneOrMany<XmlValue>)>,
    /// All text below this element in document order, trimmed.
    pub text: String,
}

impl XmlValue {
    /// Values stored under `name`, if any.
    pub fn child(&self, name: &str) -> Option<&OneOrMany<XmlValue>> {
        match self {
            XmlValue::Text(_) => None,
            XmlValue::Element(element) => element
                .children
                .iter()
                .find(|(child_name, _)| child_name == name)
                .map(|(_, values)| values),
        }
    }

    pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlValue> + 'a {
        self.child(name).into_iter().flat_map(|values| values.iter())
    }

    pub fn first(&self, name: &str) -> Option<&XmlValue> {
        self.child(name).and_then(|values| values.first())
    }

    /// Follows the first child at each step of `path`.
    pub fn path(&self, path: &[&str]) -> Option<&XmlValue> {
        path.iter().try_fold(self, |value, name| value.first(name))
    }

    pub fn text(&self) -> &str {
        match self {
            XmlValue::Text(text) => text,
            XmlValue::Element(element) => &element.text,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            XmlValue::Text(_) => None,
            XmlValue::Element(element) => element
                .attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
        }
    }
}

/// A decoded document: the root element name and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: String,
    pub value: XmlValue,
}

struct ElementBuilder {
    name: String,
    element: XmlElement,
}

impl ElementBuilder {
    fn open(start: &BytesStart<'_>) -> Result<ElementBuilder, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(ElementBuilder {
            name,
            element: XmlElement {
                attributes,
                ..XmlElement::default()
            },
        })
    }

    fn add_child(&mut self, name: String, value: XmlValue, raw_text: &str) {
        self.element.text.push_str(raw_text);
        let children = &mut self.element.children;
        match children.iter().position(|(child_name, _)| *child_name == name) {
            Some(idx) => {
                let (_, existing) = children.remove(idx);
                children.insert(idx, (name, existing.push(value)));
            }
            None => children.push((name, OneOrMany::One(value))),
        }
    }

    fn finish(self) -> Finished {
        let mut element = self.element;
        let raw_text = std::mem::take(&mut element.text);
        element.text = raw_text.trim().to_string();
        let value = if element.attributes.is_empty() && element.children.is_empty() {
            XmlValue::Text(element.text.clone())
        } else {
            XmlValue::Element(element)
        };
        Finished {
            name: self.name,
            value,
            raw_text,
        }
    }
}

/// A closed element. `raw_text` is untrimmed so the parent keeps the
/// whitespace around inline markup.
struct Finished {
    name: String,
    value: XmlValue,
    raw_text: String,
}

fn attach(
    stack: &mut [ElementBuilder],
    root: &mut Option<XmlDocument>,
    Finished {
        name,
        value,
        raw_text,
    }: Finished,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value, &raw_text),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(XmlDocument { root: name, value }),
    }
    Ok(())
}

/// Decodes XML text into an [`XmlDocument`].
pub fn decode(input: &str) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<ElementBuilder> = Vec::new();
    let mut root: Option<XmlDocument> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(ElementBuilder::open(&start)?),
            Event::Empty(start) => {
                let finished = ElementBuilder::open(&start)?.finish();
                attach(&mut stack, &mut root, finished)?;
            }
            Event::End(_) => {
                let builder = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                attach(&mut stack, &mut root, builder.finish())?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(current) => current.element.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                match stack.last_mut() {
                    Some(current) => current.element.text.push_str(&text),
                    None => return Err(XmlError::TextOutsideRoot),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::UnclosedElement(
            stack.pop().map(|b| b.name).unwrap_or_default(),
        ));
    }
    root.ok_or(XmlError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_child_collapses_to_value() {
        let doc = decode("<Root><IdList><Id>42</Id></IdList></Root>").unwrap();
        assert_eq!(doc.root, "Root");

        let ids = doc.value.path(&["IdList"]).unwrap().child("Id").unwrap();
        assert_eq!(ids, &OneOrMany::One(XmlValue::Text("42".to_string())));
        assert_eq!(ids.clone().into_vec().len(), 1);
    }

    #[test]
    fn test_repeated_children_become_sequence() {
        let doc = decode("<IdList><Id>1</Id><Id>2</Id><Id>3</Id></IdList>").unwrap();
        let ids: Vec<&str> = doc.value.children("Id").map(|v| v.text()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_element_is_empty_text() {
        let doc = decode("<r><IdList/></r>").unwrap();
        assert_eq!(doc.value.first("IdList"), Some(&XmlValue::Text(String::new())));
        assert_eq!(doc.value.children("Missing").count(), 0);
    }

    #[test]
    fn test_attributes_and_text() {
        let doc = decode(r#"<r><PMID Version="1">123</PMID></r>"#).unwrap();
        let pmid = doc.value.first("PMID").unwrap();
        assert_eq!(pmid.attribute("Version"), Some("1"));
        assert_eq!(pmid.text(), "123");
    }

    #[test]
    fn test_inline_markup_keeps_text_order() {
        let doc = decode("<t>Effects of <i>E. coli</i> on <b>gut</b> flora &amp; more</t>").unwrap();
        assert_eq!(doc.value.text(), "Effects of E. coli on gut flora & more");
    }

    #[test]
    fn test_whitespace_inside_inline_markup_is_kept() {
        let doc = decode("<t>Effect of<i> IL-6 </i>on mice</t>").unwrap();
        assert_eq!(doc.value.text(), "Effect of IL-6 on mice");
        assert_eq!(doc.value.first("i"), Some(&XmlValue::Text("IL-6".to_string())));

        let doc = decode("<t>  A <b>bold</b> claim  </t>").unwrap();
        assert_eq!(doc.value.text(), "A bold claim");
    }

    #[test]
    fn test_declaration_and_doctype_are_ignored() {
        let input = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle//EN" "pubmed.dtd">
<!-- comment -->
<PubmedArticleSet></PubmedArticleSet>"#;
        let doc = decode(input).unwrap();
        assert_eq!(doc.root, "PubmedArticleSet");
        assert_eq!(doc.value, XmlValue::Text(String::new()));
    }

    #[test]
    fn test_malformed_xml_fails() {
        assert!(decode("<a><b></a>").is_err());
        assert!(decode("<a><b>").is_err());
        assert!(matches!(decode("<a/><b/>"), Err(XmlError::MultipleRoots)));
        assert!(matches!(decode(""), Err(XmlError::Empty)));
        assert!(matches!(decode("not xml"), Err(XmlError::TextOutsideRoot)));
    }
}
