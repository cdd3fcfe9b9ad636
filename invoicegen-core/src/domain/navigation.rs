//! Sidebar navigation model and panel resolution

use serde::Serialize;

/// Root path, rendered as the dashboard
pub const HOME_PATH: &str = "/";

/// A sidebar entry, optionally with nested entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub children: &'static [MenuItem],
}

impl MenuItem {
    const fn leaf(label: &'static str, path: &'static str) -> Self {
        Self { label, path, children: &[] }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Top-level entries match by prefix, so `/` is active on every page
    pub fn is_active(&self, active_path: &str) -> bool {
        active_path.starts_with(self.path)
    }

    /// Nested entries match exactly
    pub fn is_active_child(&self, active_path: &str) -> bool {
        active_path == self.path
    }
}

/// A titled group of sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

const CUSTOMER_ITEMS: &[MenuItem] = &[
    MenuItem::leaf("Add Customer", "/customers/add"),
    MenuItem::leaf("Customer List", "/customers/list"),
];

const MAIN_ITEMS: &[MenuItem] = &[
    MenuItem::leaf("Overview", HOME_PATH),
    MenuItem::leaf("Statistics", "/statistics"),
    MenuItem {
        label: "Customers",
        path: "/customers",
        children: CUSTOMER_ITEMS,
    },
    MenuItem::leaf("Invoices", "/invoices"),
    MenuItem::leaf("Messages", "/messages"),
];

const GENERAL_ITEMS: &[MenuItem] = &[
    MenuItem::leaf("Settings", "/settings"),
    MenuItem::leaf("Security", "/security"),
];

/// Sidebar layout, in display order
pub const SIDEBAR: &[MenuSection] = &[
    MenuSection { title: "MENU", items: MAIN_ITEMS },
    MenuSection { title: "GENERAL", items: GENERAL_ITEMS },
];

/// What the shell renders in its main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Login,
    Dashboard,
    Customers,
    AddCustomer,
    CustomerList,
    /// Known or unknown path with no view behind it yet
    Blank,
}

impl Panel {
    /// Panel for an authenticated user at `path`
    pub fn for_path(path: &str) -> Self {
        match path {
            HOME_PATH => Panel::Dashboard,
            "/customers" => Panel::Customers,
            "/customers/add" => Panel::AddCustomer,
            "/customers/list" => Panel::CustomerList,
            _ => Panel::Blank,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Login => "Login",
            Panel::Dashboard => "Dashboard",
            Panel::Customers => "Customers",
            Panel::AddCustomer => "Add Customer",
            Panel::CustomerList => "Customer List",
            Panel::Blank => "",
        }
    }
}

/// Placeholder figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_invoices: u64,
    pub total_customers: u64,
    pub total_revenue: String,
}

impl Default for DashboardSummary {
    fn default() -> Self {
        Self {
            total_invoices: 0,
            total_customers: 0,
            total_revenue: "$0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_item(path: &str) -> Option<&'static MenuItem> {
        SIDEBAR
            .iter()
            .flat_map(|section| section.items.iter())
            .flat_map(|item| std::iter::once(item).chain(item.children.iter()))
            .find(|item| item.path == path)
    }

    #[test]
    fn test_panel_for_known_paths() {
        assert_eq!(Panel::for_path("/"), Panel::Dashboard);
        assert_eq!(Panel::for_path("/customers"), Panel::Customers);
        assert_eq!(Panel::for_path("/customers/add"), Panel::AddCustomer);
        assert_eq!(Panel::for_path("/customers/list"), Panel::CustomerList);
    }

    #[test]
    fn test_panel_for_menu_entry_without_view_is_blank() {
        assert_eq!(Panel::for_path("/invoices"), Panel::Blank);
        assert_eq!(Panel::for_path("/nowhere"), Panel::Blank);
    }

    #[test]
    fn test_top_level_items_match_by_prefix() {
        let customers = find_item("/customers").unwrap();
        assert!(customers.has_children());
        assert!(customers.is_active("/customers/add"));
        assert!(!customers.is_active("/invoices"));

        // Overview's path is a prefix of everything
        let overview = find_item("/").unwrap();
        assert!(overview.is_active("/settings"));
    }

    #[test]
    fn test_children_match_exactly() {
        let add = find_item("/customers/add").unwrap();
        assert!(add.is_active_child("/customers/add"));
        assert!(!add.is_active_child("/customers"));
    }

    #[test]
    fn test_sidebar_layout() {
        assert_eq!(SIDEBAR.len(), 2);
        assert_eq!(SIDEBAR[0].title, "MENU");
        assert_eq!(SIDEBAR[0].items.len(), 5);
        assert_eq!(SIDEBAR[1].items[1].label, "Security");
        assert!(find_item("/customers/list").is_some());
        assert!(find_item("/reports").is_none());
    }
}
