//! Thin views over table rows and cells
//!
//! Field extractors only see these types, never the parsed document.

use scraper::{ElementRef, Node, Selector};

/// One `<td>` of an incident row
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: ElementRef<'a>,
}

impl<'a> Cell<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Concatenated text of the cell, untrimmed
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Trimmed text of the first descendant matching `selector`
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.element
            .select(selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
    }

    /// Attribute value of the first descendant matching `selector`
    pub fn first_attr(&self, selector: &Selector, attr: &str) -> Option<&'a str> {
        self.element
            .select(selector)
            .next()
            .and_then(|element| element.value().attr(attr))
    }

    /// All descendants matching `selector`
    pub fn select<'s>(&self, selector: &'s Selector) -> impl Iterator<Item = ElementRef<'a>> + 's
    where
        'a: 's,
    {
        self.element.select(selector)
    }
}

/// A table row with its cells in document order
#[derive(Debug, Clone)]
pub struct Row<'a> {
    element: ElementRef<'a>,
    cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    pub fn new(element: ElementRef<'a>, cell_selector: &Selector) -> Self {
        let cells = element.select(cell_selector).map(Cell::new).collect();
        Self { element, cells }
    }

    pub fn cells(&self) -> &[Cell<'a>] {
        &self.cells
    }

    /// Concatenated visible text of the whole row
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Values of `attr` on every descendant matching `selector`
    pub fn attrs<'s>(
        &self,
        selector: &'s Selector,
        attr: &'s str,
    ) -> impl Iterator<Item = &'a str> + 's
    where
        'a: 's,
    {
        self.element
            .select(selector)
            .filter_map(move |element| element.value().attr(attr))
    }

    /// Whether another row is nested somewhere inside this one
    pub fn contains_nested_row(&self, row_selector: &Selector) -> bool {
        let own_id = self.element.id();
        self.element
            .select(row_selector)
            .any(|inner| inner.id() != own_id)
    }
}

/// Whether the node right before `element` mentions `keyword` (lower-case)
pub fn preceded_by(element: &ElementRef<'_>, keyword: &str) -> bool {
    let Some(previous) = element.prev_sibling() else {
        return false;
    };

    match previous.value() {
        Node::Text(text) => text.to_lowercase().contains(keyword),
        _ => ElementRef::wrap(previous)
            .map(|e| e.text().collect::<String>().to_lowercase().contains(keyword))
            .unwrap_or(false),
    }
}
