//! Console app shell: sidebar entries, page titles and the route table.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Section(&'static str),
    Item(NavItem),
}

const fn item(name: &'static str, href: &'static str) -> NavEntry {
    NavEntry::Item(NavItem { name, href })
}

pub const SIDEBAR: &[NavEntry] = &[
    item("Dashboard", "/"),
    NavEntry::Section("Content Management"),
    item("Blogs", "/blogs"),
    item("News", "/news"),
    item("Events", "/events"),
    item("Gallery", "/gallery"),
    item("Videos", "/videos"),
    NavEntry::Section("Business Management"),
    item("Investor Relations", "/investor-relations"),
    item("Offices", "/offices"),
    item("Partners", "/partners"),
    item("Careers", "/careers"),
    NavEntry::Section("Team Management"),
    item("Team Members", "/team-members"),
    item("Sales Experts", "/sales-experts"),
    NavEntry::Section("Communication"),
    item("Inquiries", "/contacts"),
    item("Applicants", "/applicants"),
];

/// Every page the console serves, `:id` marking a path parameter.
pub const ROUTES: &[&str] = &[
    "/",
    "/blogs",
    "/blogs/new",
    "/blogs/edit/:id",
    "/news",
    "/events",
    "/gallery",
    "/videos",
    "/investor-relations",
    "/offices",
    "/partners",
    "/careers",
    "/team-members",
    "/sales-experts",
    "/contacts",
    "/applicants",
];

pub fn nav_items() -> impl Iterator<Item = &'static NavItem> {
    SIDEBAR.iter().filter_map(|entry| match entry {
        NavEntry::Item(item) => Some(item),
        NavEntry::Section(_) => None,
    })
}

/// Sidebar item highlighted for `path`: exact match for the dashboard, prefix
/// match for everything else.
pub fn active_item(path: &str) -> Option<&'static NavItem> {
    nav_items().find(|item| match item.href {
        "/" => path == "/",
        href => path.starts_with(href),
    })
}

pub fn page_title(path: &str) -> &'static str {
    active_item(path).map(|item| item.name).unwrap_or("Dashboard")
}

/// Whether `path` is one of the console's pages.
pub fn is_route(path: &str) -> bool {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().any(|route| matches_pattern(route, path))
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut expected = pattern.split('/');
    let mut actual = path.split('/');
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some(want), Some(got)) if want.starts_with(':') => {
                if got.is_empty() {
                    return false;
                }
            }
            (Some(want), Some(got)) if want == got => {}
            _ => return false,
        }
    }
}
