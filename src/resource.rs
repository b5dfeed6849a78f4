//! The two parallel resources served by the API.

use crate::stores::SortColumn;

/// One of the two kinds of transaction, each stored in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl Resource {
    /// The name of the table holding this resource's rows.
    pub fn table(self) -> &'static str {
        match self {
            Resource::Expense => "expenses",
            Resource::Income => "incomes",
        }
    }

    /// The capitalised singular name used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            Resource::Expense => "Expense",
            Resource::Income => "Income",
        }
    }

    /// The aggregate procedure that sums this resource's amounts.
    pub fn total_procedure(self) -> AggregateProcedure {
        match self {
            Resource::Expense => AggregateProcedure::ExpensesSum,
            Resource::Income => AggregateProcedure::TotalIncome,
        }
    }

    /// The message sent to the client when the total cannot be computed.
    pub fn total_error_message(self) -> &'static str {
        match self {
            Resource::Expense => "Error fetching total expenses",
            Resource::Income => "Error fetching total income",
        }
    }

    /// Pick the order for a listing from the raw `sortBy` query parameter.
    ///
    /// Unrecognised values fall back to the resource's default order: expenses
    /// keep the store's order, incomes are ordered by ID.
    pub fn sort_order(self, sort_by: Option<&str>) -> Option<SortColumn> {
        match sort_by {
            Some("description") => Some(SortColumn::Description),
            Some("amount") => Some(SortColumn::Amount),
            _ => match self {
                Resource::Expense => None,
                Resource::Income => Some(SortColumn::Id),
            },
        }
    }
}

/// A named store-side computation that returns a total without transferring rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateProcedure {
    /// Sum of every expense amount.
    ExpensesSum,
    /// Sum of every income amount.
    TotalIncome,
}

impl AggregateProcedure {
    /// The procedure's name as known to the store.
    pub fn name(self) -> &'static str {
        match self {
            AggregateProcedure::ExpensesSum => "get_expenses_sum",
            AggregateProcedure::TotalIncome => "get_total_income",
        }
    }

    /// The resource whose amounts the procedure sums.
    pub fn resource(self) -> Resource {
        match self {
            AggregateProcedure::ExpensesSum => Resource::Expense,
            AggregateProcedure::TotalIncome => Resource::Income,
        }
    }
}
