//! Excel 2003 XML (SpreadsheetML) exports
//!
//! The document is loaded into a small element tree first. Elements are
//! matched by local name, so `ss:Row` and a default-namespaced `Row` are
//! treated the same.

use crate::types::{PriceBookError, Result, Row};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn new(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All descendants with the given local name, in document order
    fn descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                out.push(child);
            }
            child.descendants(name, out);
        }
    }

    fn find(&self, name: &str) -> Option<&Element> {
        self.child_elements()
            .find_map(|child| if child.name == name { Some(child) } else { child.find(name) })
    }

    /// Text ahead of the first child element. Markup nested inside a
    /// `Data` cell (rich-text runs) ends the value.
    fn leading_text(&self) -> String {
        self.children
            .iter()
            .map_while(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Extract every row of the worksheet table.
///
/// The table is the first `Table` inside the first `Worksheet`, falling back
/// to the first `Table` anywhere in the document. Each cell contributes the
/// text of its first `Data` element up to any nested markup, or an empty
/// string. Rows without any cells are dropped.
pub(super) fn parse_rows(content: &[u8]) -> Result<Vec<Row>> {
    let root = parse_document(content)?;
    let table = find_table(&root)
        .ok_or_else(|| PriceBookError::Format("Could not find Table element in XML".into()))?;

    let mut row_elements = Vec::new();
    table.descendants("Row", &mut row_elements);

    let mut rows = Vec::with_capacity(row_elements.len());
    for row in row_elements {
        let mut cell_elements = Vec::new();
        row.descendants("Cell", &mut cell_elements);
        if cell_elements.is_empty() {
            continue;
        }

        let cells: Row = cell_elements
            .into_iter()
            .map(|cell| {
                let mut data = Vec::new();
                cell.descendants("Data", &mut data);
                data.first().map(|d| d.leading_text()).unwrap_or_default()
            })
            .collect();
        rows.push(cells);
    }

    Ok(rows)
}

fn find_table(root: &Element) -> Option<&Element> {
    let in_worksheet = if root.name == "Worksheet" {
        root.find("Table")
    } else {
        root.find("Worksheet").and_then(|ws| ws.find("Table"))
    };

    in_worksheet.or_else(|| {
        if root.name == "Table" {
            Some(root)
        } else {
            root.find("Table")
        }
    })
}

fn parse_document(content: &[u8]) -> Result<Element> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let text = std::str::from_utf8(content)
        .map_err(|e| PriceBookError::Format(format!("spreadsheet is not valid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Element::new(&e)),
            Event::Empty(e) => attach(&mut stack, &mut root, Element::new(&e)),
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = e.unescape().map_err(quick_xml::Error::from)?;
                    parent.children.push(Node::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = e.into_inner();
                    parent
                        .children
                        .push(Node::Text(String::from_utf8_lossy(&raw).into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PriceBookError::Format(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| PriceBookError::Format("document has no root element".into()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
