//! Role-scoped dashboard selection.
//!
//! The view layer picks a dashboard once per session change with
//! [`DashboardView::select`] and asks the chosen view for its title, menu, and
//! capabilities instead of branching on the role at every render.

use serde::Serialize;

use kalartz_core::Role;

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Stable view identifier.
    pub id: &'static str,
    /// Text shown in the sidebar.
    pub label: &'static str,
}

const fn item(id: &'static str, label: &'static str) -> MenuItem {
    MenuItem { id, label }
}

const CUSTOMER_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard"),
    item("orders", "My Orders"),
    item("wishlist", "Wishlist"),
    item("history", "Order History"),
    item("profile", "Profile"),
];

const VENDOR_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard"),
    item("products", "My Products"),
    item("orders", "Orders"),
    item("analytics", "Analytics"),
    item("profile", "Profile"),
];

const ADMIN_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard"),
    item("users", "Users"),
    item("vendors", "Vendors"),
    item("products", "Products"),
    item("orders", "Orders"),
    item("analytics", "Analytics"),
    item("settings", "Settings"),
];

/// The dashboard shown for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    /// Public catalog home; no sidebar.
    Home,
    Customer,
    Vendor,
    Admin,
}

impl DashboardView {
    /// Pick the dashboard for a session's role (`None` when signed out).
    #[must_use]
    pub const fn select(role: Option<Role>) -> Self {
        match role {
            None => Self::Home,
            Some(Role::Customer) => Self::Customer,
            Some(Role::Vendor) => Self::Vendor,
            Some(Role::Admin) => Self::Admin,
        }
    }

    /// Heading for the view.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Kalartz",
            Self::Customer => "Customer Dashboard",
            Self::Vendor => "Vendor Dashboard",
            Self::Admin => "Admin Dashboard",
        }
    }

    /// Sidebar entries. Empty for the public home view.
    #[must_use]
    pub const fn menu(&self) -> &'static [MenuItem] {
        match self {
            Self::Home => &[],
            Self::Customer => CUSTOMER_MENU,
            Self::Vendor => VENDOR_MENU,
            Self::Admin => ADMIN_MENU,
        }
    }

    /// Whether the view exposes a menu entry with this ID.
    #[must_use]
    pub fn has_menu_item(&self, id: &str) -> bool {
        self.menu().iter().any(|entry| entry.id == id)
    }

    /// Whether the view offers checkout. Any signed-in role may buy.
    #[must_use]
    pub const fn can_purchase(&self) -> bool {
        !matches!(self, Self::Home)
    }

    #[must_use]
    pub const fn can_manage_products(&self) -> bool {
        matches!(self, Self::Vendor | Self::Admin)
    }

    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub const fn can_view_analytics(&self) -> bool {
        matches!(self, Self::Vendor | Self::Admin)
    }

    #[must_use]
    pub const fn has_wishlist(&self) -> bool {
        matches!(self, Self::Customer)
    }
}
