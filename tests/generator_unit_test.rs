//! Generator properties: referential integrity, value ranges, precision and
//! the branch/manager linking pass.

use bank_seed::config::RecordCounts;
use bank_seed::generator::faker::round_to;
use bank_seed::generator::{
    Generator, IdPool, AMOUNT_RANGE, BALANCE_RANGE, INTEREST_RATE_RANGE, SALARY_RANGE,
};
use bank_seed::model::{Dataset, Gender, Position};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use uuid::Uuid;

fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn counts() -> RecordCounts {
    RecordCounts {
        branches: 5,
        employees: 40,
        customers: 200,
        accounts: 300,
        transactions: 1000,
    }
}

fn generate(seed: u64, counts: RecordCounts) -> Dataset {
    Generator::new(seed, counts)
        .with_reference_time(reference_time())
        .generate()
        .unwrap()
}

fn id_set<T>(rows: &[T], id: impl Fn(&T) -> Uuid) -> HashSet<Uuid> {
    rows.iter().map(id).collect()
}

#[test]
fn test_references_point_at_generated_ids() {
    let data = generate(42, counts());

    let branch_ids = id_set(&data.branches, |b| b.id);
    let employee_ids = id_set(&data.employees, |e| e.id);
    let customer_ids = id_set(&data.customers, |c| c.id);
    let account_ids = id_set(&data.accounts, |a| a.id);

    for employee in &data.employees {
        assert!(branch_ids.contains(&employee.branch_id));
    }
    for customer in &data.customers {
        assert!(branch_ids.contains(&customer.branch_id));
    }
    for account in &data.accounts {
        assert!(customer_ids.contains(&account.customer_id));
        assert!(branch_ids.contains(&account.branch_id));
    }
    for tx in &data.transactions {
        assert!(account_ids.contains(&tx.account_id));
        if let Some(employee_id) = tx.employee_id {
            assert!(employee_ids.contains(&employee_id));
        }
    }
}

#[test]
fn test_every_branch_has_an_existing_manager() {
    let data = generate(7, counts());
    let employee_ids = id_set(&data.employees, |e| e.id);

    for branch in &data.branches {
        let manager = branch.manager_id.expect("manager assigned");
        assert!(employee_ids.contains(&manager));
    }
}

#[test]
fn test_identifiers_unique() {
    let data = generate(3, counts());
    let mut all = HashSet::new();

    for id in data
        .branches
        .iter()
        .map(|b| b.id)
        .chain(data.employees.iter().map(|e| e.id))
        .chain(data.customers.iter().map(|c| c.id))
        .chain(data.accounts.iter().map(|a| a.id))
        .chain(data.transactions.iter().map(|t| t.id))
    {
        assert!(all.insert(id), "duplicate id {}", id);
    }
    assert_eq!(all.len(), data.total_rows());
}

#[test]
fn test_unique_columns() {
    let data = generate(11, counts());

    let emails: HashSet<&str> = data
        .employees
        .iter()
        .map(|e| e.email.as_str())
        .chain(data.customers.iter().map(|c| c.email.as_str()))
        .collect();
    assert_eq!(emails.len(), data.employees.len() + data.customers.len());

    let national_ids: HashSet<&str> = data.customers.iter().map(|c| c.national_id.as_str()).collect();
    assert_eq!(national_ids.len(), data.customers.len());

    let account_numbers: HashSet<&str> = data
        .accounts
        .iter()
        .map(|a| a.account_number.as_str())
        .collect();
    assert_eq!(account_numbers.len(), data.accounts.len());
}

#[test]
fn test_numeric_ranges_and_precision() {
    let data = generate(5, counts());

    for employee in &data.employees {
        assert!(employee.salary >= SALARY_RANGE.0 && employee.salary <= SALARY_RANGE.1);
        assert_eq!(employee.salary, round_to(employee.salary, 2));
    }
    for account in &data.accounts {
        assert!(account.balance >= BALANCE_RANGE.0 && account.balance <= BALANCE_RANGE.1);
        assert_eq!(account.balance, round_to(account.balance, 2));
        assert!(
            account.interest_rate >= INTEREST_RATE_RANGE.0
                && account.interest_rate <= INTEREST_RATE_RANGE.1
        );
        assert_eq!(account.interest_rate, round_to(account.interest_rate, 4));
    }
    for tx in &data.transactions {
        assert!(tx.amount >= AMOUNT_RANGE.0 && tx.amount <= AMOUNT_RANGE.1);
        assert_eq!(tx.amount, round_to(tx.amount, 2));
    }
}

#[test]
fn test_date_windows() {
    let now = reference_time();
    let data = generate(9, counts());

    for customer in &data.customers {
        let age = now.year() - customer.date_of_birth.year();
        assert!((17..=91).contains(&age), "age {} out of range", age);
        assert!(customer.date_of_birth <= NaiveDate::from_ymd_opt(2007, 3, 1).unwrap());
    }
    for account in &data.accounts {
        assert!(account.opened_at <= now.date());
        assert!(account.opened_at >= NaiveDate::from_ymd_opt(2010, 3, 1).unwrap());
    }
    for tx in &data.transactions {
        assert!(tx.transaction_date <= now);
        assert!(tx.transaction_date >= NaiveDate::from_ymd_opt(2023, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(tx.updated_at, now);
    }
}

#[test]
fn test_vocabularies_covered() {
    let data = generate(21, counts());

    let positions: HashSet<Position> = data.employees.iter().map(|e| e.position).collect();
    let genders: HashSet<Gender> = data.customers.iter().map(|c| c.gender).collect();

    // 40 employees over 5 positions and 200 customers over 3 genders
    assert_eq!(positions.len(), Position::ALL.len());
    assert_eq!(genders.len(), Gender::ALL.len());
}

#[test]
fn test_single_branch_single_employee() {
    let counts = RecordCounts {
        branches: 1,
        employees: 1,
        customers: 0,
        accounts: 0,
        transactions: 0,
    };
    let data = generate(1, counts);

    assert_eq!(data.branches.len(), 1);
    assert_eq!(data.employees.len(), 1);
    assert_eq!(data.employees[0].branch_id, data.branches[0].id);
    assert_eq!(data.branches[0].manager_id, Some(data.employees[0].id));
}

#[test]
fn test_unassisted_transactions_about_eighty_percent() {
    let counts = RecordCounts {
        branches: 1,
        employees: 5,
        customers: 1,
        accounts: 1,
        transactions: 20_000,
    };
    let data = generate(99, counts);

    let nulls = data
        .transactions
        .iter()
        .filter(|t| t.employee_id.is_none())
        .count();
    let share = nulls as f64 / data.transactions.len() as f64;
    assert!((0.77..=0.83).contains(&share), "null share {}", share);
}

#[test]
fn test_same_seed_same_data() {
    let a = generate(1234, counts());
    let b = generate(1234, counts());
    let c = generate(4321, counts());

    assert_eq!(a.customers, b.customers);
    assert_eq!(a.accounts, b.accounts);
    assert_ne!(a.customers, c.customers);
}

#[test]
fn test_invalid_counts_fail() {
    let counts = RecordCounts {
        branches: 0,
        employees: 3,
        customers: 0,
        accounts: 0,
        transactions: 0,
    };
    let err = Generator::new(1, counts).generate().unwrap_err();
    assert!(err.to_string().contains("branch"));
}

#[test]
fn test_steps_share_id_pool() {
    let mut generator = Generator::new(2, counts()).with_reference_time(reference_time());
    let mut ids = IdPool::new();

    let mut branches = generator.generate_branches(&mut ids);
    let employees = generator.generate_employees(&mut ids).unwrap();
    assert_eq!(ids.branches.len(), 5);
    assert_eq!(ids.employees.len(), 40);
    assert!(branches.iter().all(|b| b.manager_id.is_none()));

    generator.assign_managers(&mut branches, &employees).unwrap();
    assert!(branches.iter().all(|b| b.manager_id.is_some()));
}

fn assert_missing_pool(err: anyhow::Error, field: &str) {
    let message = err.to_string();
    assert!(message.contains(field), "unexpected error: {}", message);
}

#[test]
fn test_employees_without_branches_fail() {
    let mut generator = Generator::new(1, counts()).with_reference_time(reference_time());
    let err = generator.generate_employees(&mut IdPool::new()).unwrap_err();
    assert_missing_pool(err, "branch_id");
}

#[test]
fn test_customers_without_branches_fail() {
    let mut generator = Generator::new(1, counts()).with_reference_time(reference_time());
    let err = generator.generate_customers(&mut IdPool::new()).unwrap_err();
    assert_missing_pool(err, "branch_id");
}

#[test]
fn test_accounts_without_customers_fail() {
    let mut generator = Generator::new(1, counts()).with_reference_time(reference_time());
    let mut ids = IdPool::new();
    generator.generate_branches(&mut ids);
    let err = generator.generate_accounts(&mut ids).unwrap_err();
    assert_missing_pool(err, "customer_id");
}

#[test]
fn test_transactions_without_accounts_fail() {
    let mut generator = Generator::new(1, counts()).with_reference_time(reference_time());
    let err = generator.generate_transactions(&IdPool::new()).unwrap_err();
    assert_missing_pool(err, "account_id");
}

#[test]
fn test_empty_pools_with_zero_counts() {
    let zero = RecordCounts {
        branches: 0,
        employees: 0,
        customers: 0,
        accounts: 0,
        transactions: 0,
    };
    let mut generator = Generator::new(1, zero).with_reference_time(reference_time());
    let mut ids = IdPool::new();

    assert!(generator.generate_employees(&mut ids).unwrap().is_empty());
    assert!(generator.generate_customers(&mut ids).unwrap().is_empty());
    assert!(generator.generate_accounts(&mut ids).unwrap().is_empty());
    assert!(generator.generate_transactions(&ids).unwrap().is_empty());
}
