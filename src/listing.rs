use serde::Serialize;

use crate::models::{ClassEntity, Parent, Role, Shift, Staff, Student, User};

pub const PAGE_SIZE: usize = 10;

/// Entities shown on a list screen expose the text the search box matches.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page.max(1))
    }
}

/// Slices one page out of already-filtered items. Pages are 1-based; page 0
/// is read as page 1 and pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let start = (page - 1).saturating_mul(per_page);

    let slice = items.iter().skip(start).take(per_page).cloned().collect();

    Page {
        items: slice,
        page,
        per_page,
        total_items: items.len(),
    }
}

pub fn filter_and_paginate<T: Searchable + Clone>(items: &[T], search: &str, page: usize, per_page: usize) -> Page<T> {
    let filtered: Vec<T> = items.iter().filter(|item| item.matches(search)).cloned().collect();
    paginate(&filtered, page, per_page)
}

/// State behind one list screen: the full fetched collection, the current
/// search text and the current page.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    search: String,
    page: usize,
    per_page: usize,
}

impl<T: Searchable + Clone> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            search: String::new(),
            page: 1,
            per_page: PAGE_SIZE,
        }
    }

    /// Replaces the collection after a refetch, keeping search and page.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn current_page(&self) -> Page<T> {
        filter_and_paginate(&self.items, &self.search, self.page, self.per_page)
    }
}

impl Searchable for ClassEntity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.class_code.as_str(), self.class_name.as_str()]
    }
}

impl Searchable for Student {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.class_codes());
        fields
    }
}

impl Searchable for Parent {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.phone_number.as_deref());
        fields
    }
}

impl Searchable for Staff {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.phone_number.as_deref());
        fields
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.email.as_str()];
        fields.extend(self.first_name.as_deref());
        fields.extend(self.last_name.as_deref());
        fields
    }
}

impl Searchable for Shift {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.key.as_str()]
    }
}

/// Extra student-screen filters applied after the search text.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub search: String,
    pub class_code: Option<String>,
    pub gender: Option<String>,
}

impl StudentFilter {
    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students
            .iter()
            .filter(|s| s.matches(&self.search))
            .filter(|s| match self.class_code.as_deref() {
                Some(code) if !code.is_empty() => s.class_codes().any(|c| c == code),
                _ => true,
            })
            .filter(|s| match self.gender.as_deref() {
                Some(gender) if !gender.is_empty() => s.gender.as_deref() == Some(gender),
                _ => true,
            })
            .collect()
    }

    pub fn page(&self, students: &[Student], page: usize) -> Page<Student> {
        let filtered: Vec<Student> = self.apply(students).into_iter().cloned().collect();
        paginate(&filtered, page, PAGE_SIZE)
    }
}
