//! Table layout of each entity: table name, column order and row values.

use super::value::SqlValue;
use crate::generator::{CURRENCY_PLACES, RATE_PLACES};
use crate::model::{Account, Branch, Customer, Employee, Transaction};

/// An entity that can be written as one row of an INSERT statement.
///
/// `values()` must return exactly one value per entry in `COLUMNS`, in the
/// same order.
pub trait InsertRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<SqlValue>;
}

impl InsertRow for Branch {
    const TABLE: &'static str = "branches";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "address",
        "city",
        "state",
        "zip_code",
        "manager_id",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            (&self.name).into(),
            (&self.address).into(),
            (&self.city).into(),
            (&self.state).into(),
            (&self.zip_code).into(),
            self.manager_id.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl InsertRow for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "branch_id",
        "name",
        "email",
        "phone",
        "position",
        "hire_date",
        "salary",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.branch_id.into(),
            (&self.name).into(),
            (&self.email).into(),
            (&self.phone).into(),
            self.position.as_str().into(),
            self.hire_date.into(),
            SqlValue::decimal(self.salary, CURRENCY_PLACES),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl InsertRow for Customer {
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "email",
        "phone",
        "address",
        "first_name",
        "last_name",
        "date_of_birth",
        "gender",
        "national_id",
        "created_at",
        "updated_at",
        "branch_id",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            (&self.email).into(),
            (&self.phone).into(),
            (&self.address).into(),
            (&self.first_name).into(),
            (&self.last_name).into(),
            self.date_of_birth.into(),
            self.gender.as_str().into(),
            (&self.national_id).into(),
            self.created_at.into(),
            self.updated_at.into(),
            self.branch_id.into(),
        ]
    }
}

impl InsertRow for Account {
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "customer_id",
        "account_number",
        "type",
        "balance",
        "opened_at",
        "interest_rate",
        "status",
        "branch_id",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.customer_id.into(),
            (&self.account_number).into(),
            self.account_type.as_str().into(),
            SqlValue::decimal(self.balance, CURRENCY_PLACES),
            self.opened_at.into(),
            SqlValue::decimal(self.interest_rate, RATE_PLACES),
            self.status.as_str().into(),
            self.branch_id.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

impl InsertRow for Transaction {
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "account_id",
        "transaction_date",
        "amount",
        "type",
        "description",
        "status",
        "employee_id",
        "created_at",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.account_id.into(),
            self.transaction_date.into(),
            SqlValue::decimal(self.amount, CURRENCY_PLACES),
            self.transaction_type.as_str().into(),
            self.description.as_str().into(),
            self.status.as_str().into(),
            self.employee_id.into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}
