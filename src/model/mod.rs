//! Banking domain model.
//!
//! One struct per table plus the closed vocabularies used by enum-like
//! columns. Cross-entity references are plain [`Uuid`]s; the two that may be
//! absent (`Branch::manager_id`, `Transaction::employee_id`) are `Option`s.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Declares a closed vocabulary: a fieldless enum with its SQL spelling,
/// the full list of variants, and `Display`.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("Unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

vocabulary!(
    /// Employee job title
    Position {
        Teller => "Teller",
        LoanOfficer => "Loan Officer",
        BranchManager => "Branch Manager",
        PersonalBanker => "Personal Banker",
        CustomerServiceRep => "Customer Service Rep",
    }
);

vocabulary!(
    Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
);

vocabulary!(
    AccountType {
        Checking => "Checking",
        Savings => "Savings",
        MoneyMarket => "Money Market",
        CertificateOfDeposit => "Certificate of Deposit",
    }
);

vocabulary!(
    AccountStatus {
        Active => "Active",
        Dormant => "Dormant",
        Closed => "Closed",
    }
);

vocabulary!(
    TransactionType {
        Deposit => "Deposit",
        Withdrawal => "Withdrawal",
        Transfer => "Transfer",
        Payment => "Payment",
        Fee => "Fee",
    }
);

vocabulary!(
    TransactionStatus {
        Completed => "Completed",
        Pending => "Pending",
        Failed => "Failed",
    }
);

vocabulary!(
    /// Free-text description attached to a transaction
    Description {
        AtmWithdrawal => "ATM Withdrawal",
        OnlineShopping => "Online Shopping",
        SalaryDeposit => "Salary Deposit",
        BillPayment => "Bill Payment",
        BankFee => "Bank Fee",
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Filled in by the manager linking pass, after employees exist
    pub manager_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: Position,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub national_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub branch_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub opened_at: NaiveDate,
    pub interest_rate: f64,
    pub status: AccountStatus,
    pub branch_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub transaction_date: NaiveDateTime,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: Description,
    pub status: TransactionStatus,
    /// Set only for teller-assisted transactions
    pub employee_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Everything produced by one generation run, in table order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub branches: Vec<Branch>,
    pub employees: Vec<Employee>,
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn total_rows(&self) -> usize {
        self.branches.len()
            + self.employees.len()
            + self.customers.len()
            + self.accounts.len()
            + self.transactions.len()
    }
}
