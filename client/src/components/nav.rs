//! Navigation model shared by both shells.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

pub const OVERVIEW_PATH: &str = "/";

/// Finance areas reachable from the shell navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinanceSection {
    Accounts,
    Expenses,
    Income,
    Invoices,
    Budgets,
    Subscriptions,
    Taxes,
    Analytics,
}

impl FinanceSection {
    pub const ALL: [Self; 8] = [
        Self::Accounts,
        Self::Expenses,
        Self::Income,
        Self::Invoices,
        Self::Budgets,
        Self::Subscriptions,
        Self::Taxes,
        Self::Analytics,
    ];

    /// Sections with a tab in the mobile bottom bar.
    pub const MOBILE_TABS: [Self; 3] = [Self::Expenses, Self::Income, Self::Invoices];

    /// Sections offered by the quick-add overlay.
    pub const QUICK_ADD: [Self; 4] = [Self::Expenses, Self::Income, Self::Invoices, Self::Subscriptions];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Expenses => "expenses",
            Self::Income => "income",
            Self::Invoices => "invoices",
            Self::Budgets => "budgets",
            Self::Subscriptions => "subscriptions",
            Self::Taxes => "taxes",
            Self::Analytics => "analytics",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Accounts => "Accounts",
            Self::Expenses => "Expenses",
            Self::Income => "Income",
            Self::Invoices => "Invoices",
            Self::Budgets => "Budgets",
            Self::Subscriptions => "Subscriptions",
            Self::Taxes => "Taxes",
            Self::Analytics => "Analytics",
        }
    }

    /// Single-glyph icon used when the sidebar is collapsed.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Accounts => "🏦",
            Self::Expenses => "💸",
            Self::Income => "💰",
            Self::Invoices => "🧾",
            Self::Budgets => "📊",
            Self::Subscriptions => "🔁",
            Self::Taxes => "🏛",
            Self::Analytics => "📈",
        }
    }

    /// Label used by the quick-add overlay.
    #[must_use]
    pub fn quick_add_label(self) -> &'static str {
        match self {
            Self::Expenses => "New expense",
            Self::Income => "New income",
            Self::Invoices => "New invoice",
            Self::Subscriptions => "New subscription",
            other => other.label(),
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    #[must_use]
    pub fn href(self) -> String {
        format!("/{}", self.slug())
    }

    /// Link that opens the section with its create form showing.
    #[must_use]
    pub fn compose_href(self) -> String {
        format!("/{}?compose=1", self.slug())
    }
}

/// Whether a nav link for `href` should render as active at `pathname`.
#[must_use]
pub fn is_active(pathname: &str, href: &str) -> bool {
    if href == OVERVIEW_PATH {
        return pathname == OVERVIEW_PATH || pathname.is_empty();
    }
    pathname == href || pathname.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}
