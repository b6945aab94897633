//! Record generator.
//!
//! Builds every table in dependency order (branches, employees, customers,
//! accounts, transactions). The branch/employee cycle is resolved in two
//! phases: branches are created without a manager, employees pick an
//! existing branch, then [`Generator::assign_managers`] links each branch to
//! an existing employee.

pub mod faker;

use crate::config::RecordCounts;
use crate::model::{
    Account, AccountStatus, AccountType, Branch, Customer, Dataset, Description, Employee, Gender,
    Position, Transaction, TransactionStatus, TransactionType,
};
use chrono::{Local, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use faker::FakeData;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

/// Salary range for employees, 2 decimals
pub const SALARY_RANGE: (f64, f64) = (40_000.0, 150_000.0);
/// Opening balance range for accounts, 2 decimals
pub const BALANCE_RANGE: (f64, f64) = (50.0, 25_000.0);
/// Annual interest rate range, 4 decimals
pub const INTEREST_RATE_RANGE: (f64, f64) = (0.0001, 0.0525);
/// Signed transaction amount range, 2 decimals
pub const AMOUNT_RANGE: (f64, f64) = (-5_000.0, 5_000.0);

pub const CURRENCY_PLACES: u8 = 2;
pub const RATE_PLACES: u8 = 4;

/// Share of transactions handled by an employee; the rest are self-service
pub const ASSISTED_TRANSACTION_PROBABILITY: f64 = 0.2;

/// Customer age bounds in years
pub const CUSTOMER_AGE_RANGE: (u32, u32) = (18, 90);

const RECENT_RECORD_DAYS: i64 = 30;
const HIRE_WINDOW_YEARS: u32 = 10;
const ACCOUNT_WINDOW_YEARS: u32 = 15;
const TRANSACTION_WINDOW_YEARS: u32 = 2;

/// Identifiers generated so far, used as the pool for foreign keys.
#[derive(Debug, Default, Clone)]
pub struct IdPool {
    pub branches: Vec<Uuid>,
    pub employees: Vec<Uuid>,
    pub customers: Vec<Uuid>,
    pub accounts: Vec<Uuid>,
}

impl IdPool {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main data generator
pub struct Generator {
    fake: FakeData<StdRng>,
    counts: RecordCounts,
    now: NaiveDateTime,
}

impl Generator {
    pub fn new(seed: u64, counts: RecordCounts) -> Self {
        let now = Local::now().naive_local();
        Self {
            fake: FakeData::new(StdRng::seed_from_u64(seed)),
            counts,
            now: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    /// Pin the clock used for `updated_at` and all date windows.
    pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
        self.now = now.with_nanosecond(0).unwrap_or(now);
        self
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.now
    }

    /// Generate all tables and link branch managers.
    pub fn generate(&mut self) -> anyhow::Result<Dataset> {
        self.counts.validate()?;
        let mut ids = IdPool::new();

        let mut branches = self.generate_branches(&mut ids);
        let employees = self.generate_employees(&mut ids)?;
        self.assign_managers(&mut branches, &employees)?;
        let customers = self.generate_customers(&mut ids)?;
        let accounts = self.generate_accounts(&mut ids)?;
        let transactions = self.generate_transactions(&ids)?;

        Ok(Dataset {
            branches,
            employees,
            customers,
            accounts,
            transactions,
        })
    }

    pub fn generate_branches(&mut self, ids: &mut IdPool) -> Vec<Branch> {
        let mut rows = Vec::with_capacity(self.counts.branches);

        for _ in 0..self.counts.branches {
            let id = self.fake.uuid();
            ids.branches.push(id);

            let name = format!("{} Central Branch", self.fake.city());
            rows.push(Branch {
                id,
                name,
                address: self.fake.street_address(),
                city: self.fake.city(),
                state: self.fake.state_abbr(),
                zip_code: self.fake.zip_code(),
                manager_id: None,
                created_at: self.recent_datetime(),
                updated_at: self.now,
            });
        }

        rows
    }

    pub fn generate_employees(&mut self, ids: &mut IdPool) -> anyhow::Result<Vec<Employee>> {
        let mut rows = Vec::with_capacity(self.counts.employees);
        let hired_from = years_before(self.now.date(), HIRE_WINDOW_YEARS);

        for _ in 0..self.counts.employees {
            let id = self.fake.uuid();
            ids.employees.push(id);

            rows.push(Employee {
                id,
                branch_id: self.fake.pick_copied("branch_id", &ids.branches)?,
                name: self.fake.full_name(),
                email: self.fake.unique_email()?,
                phone: self.fake.phone(),
                position: self.fake.pick_copied("position", Position::ALL)?,
                hire_date: self.fake.date_between(hired_from, self.now.date()),
                salary: self
                    .fake
                    .decimal(SALARY_RANGE.0, SALARY_RANGE.1, CURRENCY_PLACES),
                created_at: self.recent_datetime(),
                updated_at: self.now,
            });
        }

        Ok(rows)
    }

    /// Second phase of the branch/employee cycle: every branch gets a
    /// manager drawn uniformly from the already generated employees.
    ///
    /// Branches are left untouched when there are no employees.
    pub fn assign_managers(
        &mut self,
        branches: &mut [Branch],
        employees: &[Employee],
    ) -> anyhow::Result<()> {
        if employees.is_empty() {
            return Ok(());
        }
        for branch in branches.iter_mut() {
            branch.manager_id = Some(self.fake.pick("manager_id", employees)?.id);
        }
        Ok(())
    }

    pub fn generate_customers(&mut self, ids: &mut IdPool) -> anyhow::Result<Vec<Customer>> {
        let mut rows = Vec::with_capacity(self.counts.customers);

        let today = self.now.date();
        // Oldest birthday still under the max age, youngest already at the min age
        let born_from = years_before(today, CUSTOMER_AGE_RANGE.1 + 1) + TimeDelta::days(1);
        let born_to = years_before(today, CUSTOMER_AGE_RANGE.0);

        for _ in 0..self.counts.customers {
            let id = self.fake.uuid();
            ids.customers.push(id);

            rows.push(Customer {
                id,
                email: self.fake.unique_email()?,
                phone: self.fake.phone(),
                address: self.fake.full_address(),
                first_name: self.fake.first_name(),
                last_name: self.fake.last_name(),
                date_of_birth: self.fake.date_between(born_from, born_to),
                gender: self.fake.pick_copied("gender", Gender::ALL)?,
                national_id: self.fake.unique_national_id()?,
                created_at: self.recent_datetime(),
                updated_at: self.now,
                branch_id: self.fake.pick_copied("branch_id", &ids.branches)?,
            });
        }

        Ok(rows)
    }

    pub fn generate_accounts(&mut self, ids: &mut IdPool) -> anyhow::Result<Vec<Account>> {
        let mut rows = Vec::with_capacity(self.counts.accounts);
        let opened_from = years_before(self.now.date(), ACCOUNT_WINDOW_YEARS);

        for _ in 0..self.counts.accounts {
            let id = self.fake.uuid();
            ids.accounts.push(id);

            rows.push(Account {
                id,
                customer_id: self.fake.pick_copied("customer_id", &ids.customers)?,
                account_number: self.fake.unique_account_number()?,
                account_type: self.fake.pick_copied("account_type", AccountType::ALL)?,
                balance: self
                    .fake
                    .decimal(BALANCE_RANGE.0, BALANCE_RANGE.1, CURRENCY_PLACES),
                opened_at: self.fake.date_between(opened_from, self.now.date()),
                interest_rate: self.fake.decimal(
                    INTEREST_RATE_RANGE.0,
                    INTEREST_RATE_RANGE.1,
                    RATE_PLACES,
                ),
                status: self.fake.pick_copied("account status", AccountStatus::ALL)?,
                branch_id: self.fake.pick_copied("branch_id", &ids.branches)?,
                created_at: self.recent_datetime(),
                updated_at: self.now,
            });
        }

        Ok(rows)
    }

    pub fn generate_transactions(&mut self, ids: &IdPool) -> anyhow::Result<Vec<Transaction>> {
        let mut rows = Vec::with_capacity(self.counts.transactions);
        let window_start = years_before(self.now.date(), TRANSACTION_WINDOW_YEARS)
            .and_time(self.now.time());

        for _ in 0..self.counts.transactions {
            let employee_id = if !ids.employees.is_empty()
                && self
                    .fake
                    .bool_with_probability(ASSISTED_TRANSACTION_PROBABILITY)
            {
                Some(self.fake.pick_copied("employee_id", &ids.employees)?)
            } else {
                None
            };

            rows.push(Transaction {
                id: self.fake.uuid(),
                account_id: self.fake.pick_copied("account_id", &ids.accounts)?,
                transaction_date: self.fake.datetime_between(window_start, self.now),
                amount: self
                    .fake
                    .decimal(AMOUNT_RANGE.0, AMOUNT_RANGE.1, CURRENCY_PLACES),
                transaction_type: self.fake.pick_copied("transaction_type", TransactionType::ALL)?,
                description: self.fake.pick_copied("description", Description::ALL)?,
                status: self.fake.pick_copied("transaction status", TransactionStatus::ALL)?,
                employee_id,
                created_at: self.recent_datetime(),
                updated_at: self.now,
            });
        }

        Ok(rows)
    }

    /// Creation timestamp within the last month
    fn recent_datetime(&mut self) -> NaiveDateTime {
        let start = self.now - TimeDelta::days(RECENT_RECORD_DAYS);
        self.fake.datetime_between(start, self.now)
    }
}

/// Same calendar day `years` years earlier (Feb 29 clamps to Feb 28).
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn small_counts() -> RecordCounts {
        RecordCounts {
            branches: 3,
            employees: 10,
            customers: 20,
            accounts: 30,
            transactions: 50,
        }
    }

    #[test]
    fn test_generator_deterministic() {
        let data1 = Generator::new(42, small_counts())
            .with_reference_time(reference_time())
            .generate()
            .unwrap();
        let data2 = Generator::new(42, small_counts())
            .with_reference_time(reference_time())
            .generate()
            .unwrap();

        assert_eq!(data1.branches, data2.branches);
        assert_eq!(data1.transactions, data2.transactions);
    }

    #[test]
    fn test_counts_respected() {
        let data = Generator::new(1, small_counts())
            .with_reference_time(reference_time())
            .generate()
            .unwrap();

        assert_eq!(data.branches.len(), 3);
        assert_eq!(data.employees.len(), 10);
        assert_eq!(data.customers.len(), 20);
        assert_eq!(data.accounts.len(), 30);
        assert_eq!(data.transactions.len(), 50);
        assert_eq!(data.total_rows(), 113);
    }

    #[test]
    fn test_branches_start_without_manager() {
        let mut gen = Generator::new(5, small_counts()).with_reference_time(reference_time());
        let mut ids = IdPool::new();
        let branches = gen.generate_branches(&mut ids);

        assert!(branches.iter().all(|b| b.manager_id.is_none()));
        assert!(branches.iter().all(|b| b.name.ends_with(" Central Branch")));
        assert_eq!(ids.branches.len(), 3);
    }

    #[test]
    fn test_assign_managers_without_employees() {
        let mut gen = Generator::new(5, small_counts()).with_reference_time(reference_time());
        let mut ids = IdPool::new();
        let mut branches = gen.generate_branches(&mut ids);
        gen.assign_managers(&mut branches, &[]).unwrap();
        assert!(branches.iter().all(|b| b.manager_id.is_none()));
    }

    #[test]
    fn test_timestamps_relative_to_reference() {
        let now = reference_time();
        let data = Generator::new(8, small_counts())
            .with_reference_time(now)
            .generate()
            .unwrap();

        for employee in &data.employees {
            assert_eq!(employee.updated_at, now);
            assert!(employee.created_at <= now);
            assert!(employee.created_at >= now - TimeDelta::days(30));
            assert!(employee.hire_date <= now.date());
            assert!(employee.hire_date >= years_before(now.date(), 10));
        }
    }

    #[test]
    fn test_years_before_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            years_before(leap, 1),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}
