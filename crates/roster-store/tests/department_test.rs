mod common;

use std::rc::Rc;

use common::{fake_names, first_raw_row, raw_rows, session, session_with_tables, table_exists};
use roster_store::{share, Department, EntityKind, StoreError};
use rusqlite::types::Value;

fn id_of(department: &roster_store::Shared<Department>) -> i64 {
    department.borrow().id().expect("department should be persisted")
}

#[test]
fn creates_table() {
    let session = session();
    session.create_table::<Department>().expect("should create table");
    assert!(table_exists(&session, "departments"));

    // Second call is a no-op.
    session.create_table::<Department>().expect("should create table again");
}

#[test]
fn drops_table() {
    let session = session();
    session.create_table::<Department>().unwrap();
    session.drop_table::<Department>().expect("should drop table");
    assert!(!table_exists(&session, "departments"));

    session.drop_table::<Department>().expect("dropping again should succeed");
}

#[test]
fn saves_department() {
    let mut session = session_with_tables();
    let department = share(Department::new("Payroll", "Building A, 5th Floor").unwrap());
    session.save(&department).expect("save should succeed");

    let id = id_of(&department);
    let row = first_raw_row(&session, "SELECT * FROM departments");
    assert_eq!(
        row,
        [
            Value::Integer(id),
            Value::Text("Payroll".into()),
            Value::Text("Building A, 5th Floor".into()),
        ]
    );

    let cached = session.departments().get(id).expect("saved department should be cached");
    assert!(Rc::ptr_eq(&cached, &department));
}

#[test]
fn creates_department() {
    let mut session = session_with_tables();
    let department = session
        .create_department("Payroll", "Building A, 5th Floor")
        .expect("create should succeed");

    let row = first_raw_row(&session, "SELECT * FROM departments");
    assert_eq!(row[0], Value::Integer(id_of(&department)));
    assert_eq!(row[1], Value::Text("Payroll".into()));
    assert_eq!(row[2], Value::Text("Building A, 5th Floor".into()));
}

#[test]
fn create_rejects_blank_name() {
    let mut session = session_with_tables();
    let err = session.create_department("  ", "Building A").unwrap_err();
    assert!(
        matches!(&err, StoreError::Validation(e) if e.message() == "Department name must be a non-empty string"),
        "unexpected error: {err:?}"
    );
    assert!(raw_rows(&session, "SELECT * FROM departments").is_empty());
}

#[test]
fn instance_from_db_registers_new_instance() {
    let mut session = session_with_tables();
    session
        .conn()
        .execute(
            "INSERT INTO departments (name, location) VALUES ('Payroll', 'Building A')",
            [],
        )
        .unwrap();

    let row = first_raw_row(&session, "SELECT * FROM departments");
    let department = session
        .instance_from_db::<Department>(&row)
        .expect("row should materialise");

    let id = id_of(&department);
    assert_eq!(row[0], Value::Integer(id));
    assert_eq!(department.borrow().name(), "Payroll");
    assert_eq!(department.borrow().location(), "Building A");
    assert!(session.departments().contains(id));
}

#[test]
fn instance_from_db_updates_cached_instance_in_place() {
    let mut session = session_with_tables();
    let department = session.create_department("Payroll", "Building A").unwrap();
    let id = id_of(&department);

    session
        .conn()
        .execute(
            "UPDATE departments SET name = 'Accounting', location = 'Building B' WHERE id = ?1",
            [id],
        )
        .unwrap();
    let row = first_raw_row(&session, "SELECT * FROM departments");

    let first = session.instance_from_db::<Department>(&row).unwrap();
    let second = session.instance_from_db::<Department>(&row).unwrap();

    assert!(Rc::ptr_eq(&first, &department));
    assert!(Rc::ptr_eq(&second, &department));
    assert_eq!(department.borrow().name(), "Accounting");
    assert_eq!(department.borrow().location(), "Building B");
    assert_eq!(session.departments().len(), 1);
}

#[test]
fn instance_from_db_rejects_non_text_column() {
    let mut session = session_with_tables();
    session
        .conn()
        .execute(
            "INSERT INTO departments (name, location) VALUES (NULL, 'Building A')",
            [],
        )
        .unwrap();
    let row = first_raw_row(&session, "SELECT * FROM departments");

    let err = session.instance_from_db::<Department>(&row).unwrap_err();
    assert!(
        matches!(&err, StoreError::Validation(e) if e.message() == "Department name must be a string"),
        "unexpected error: {err:?}"
    );
    assert!(session.departments().is_empty());
}

#[test]
fn failed_refresh_leaves_cached_instance_untouched() {
    let mut session = session_with_tables();
    let department = session.create_department("Payroll", "Building A").unwrap();
    let id = id_of(&department);

    let row = vec![
        Value::Integer(id),
        Value::Text("Accounting".into()),
        Value::Text(" ".into()),
    ];
    assert!(session.instance_from_db::<Department>(&row).is_err());
    assert_eq!(department.borrow().name(), "Payroll");
    assert_eq!(department.borrow().location(), "Building A");
}

#[test]
fn instance_from_db_rejects_malformed_rows() {
    let mut session = session_with_tables();

    let short = vec![Value::Integer(1), Value::Text("Payroll".into())];
    assert!(matches!(
        session.instance_from_db::<Department>(&short),
        Err(StoreError::MalformedRow { .. })
    ));

    let null_id = vec![
        Value::Null,
        Value::Text("Payroll".into()),
        Value::Text("Building A".into()),
    ];
    assert!(matches!(
        session.instance_from_db::<Department>(&null_id),
        Err(StoreError::MalformedRow { .. })
    ));
}

#[test]
fn finds_by_id() {
    let mut session = session_with_tables();
    let payroll = session.create_department("Payroll", "Building A").unwrap();
    let hr = session.create_department("Human Resources", "Building C").unwrap();

    let found = session.find_by_id::<Department>(id_of(&payroll)).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &payroll));
    let found = session.find_by_id::<Department>(id_of(&hr)).unwrap().unwrap();
    assert_eq!(found.borrow().name(), "Human Resources");

    assert!(session.find_by_id::<Department>(9999).unwrap().is_none());
}

#[test]
fn finds_by_name() {
    let mut session = session_with_tables();
    let names = fake_names(2);
    let first = session.create_department(&names[0], "Building A").unwrap();
    let second = session.create_department(&names[1], "Building B").unwrap();

    let found = session.find_by_name::<Department>(&names[0]).unwrap().unwrap();
    assert_eq!(id_of(&found), id_of(&first));
    let found = session.find_by_name::<Department>(&names[1]).unwrap().unwrap();
    assert_eq!(id_of(&found), id_of(&second));

    assert!(session.find_by_name::<Department>("Unknown").unwrap().is_none());
}

#[test]
fn find_by_name_returns_first_match() {
    let mut session = session_with_tables();
    let first = session.create_department("Payroll", "Building A").unwrap();
    session.create_department("Payroll", "Building B").unwrap();

    let found = session.find_by_name::<Department>("Payroll").unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &first));
}

#[test]
fn updates_row() {
    let mut session = session_with_tables();
    let payroll = session.create_department("Payroll", "Building A").unwrap();
    let hr = session.create_department("Human Resources", "Building C").unwrap();

    {
        let mut department = payroll.borrow_mut();
        department.set_name("Payroll and Benefits").unwrap();
        department.set_location("Building B").unwrap();
    }
    session.update(&payroll).expect("update should succeed");

    let rows = raw_rows(&session, "SELECT name, location FROM departments ORDER BY id");
    assert_eq!(
        rows,
        [
            vec![
                Value::Text("Payroll and Benefits".into()),
                Value::Text("Building B".into())
            ],
            vec![
                Value::Text("Human Resources".into()),
                Value::Text("Building C".into())
            ],
        ]
    );
    assert_eq!(hr.borrow().name(), "Human Resources");
}

#[test]
fn save_on_persisted_department_updates() {
    let mut session = session_with_tables();
    let department = session.create_department("Payroll", "Building A").unwrap();
    let id = id_of(&department);

    department.borrow_mut().set_location("Building D").unwrap();
    session.save(&department).unwrap();

    assert_eq!(id_of(&department), id, "save should not insert a second row");
    let rows = raw_rows(&session, "SELECT location FROM departments");
    assert_eq!(rows, [vec![Value::Text("Building D".into())]]);
}

#[test]
fn deletes_row() {
    let mut session = session_with_tables();
    let payroll = session.create_department("Payroll", "Building A").unwrap();
    let hr = session.create_department("Human Resources", "Building C").unwrap();
    let id = id_of(&payroll);

    session.delete(&payroll).expect("delete should succeed");

    assert_eq!(payroll.borrow().id(), None);
    assert!(!session.departments().contains(id));
    assert!(session.find_by_id::<Department>(id).unwrap().is_none());

    let remaining = session.find_by_id::<Department>(id_of(&hr)).unwrap().unwrap();
    assert!(Rc::ptr_eq(&remaining, &hr));
}

#[test]
fn gets_all() {
    let mut session = session_with_tables();
    let payroll = session.create_department("Payroll", "Building A").unwrap();
    let hr = session.create_department("Human Resources", "Building C").unwrap();

    let all = session.get_all::<Department>().unwrap();
    assert_eq!(all.len(), 2);
    assert!(Rc::ptr_eq(&all[0], &payroll));
    assert!(Rc::ptr_eq(&all[1], &hr));
}

#[test]
fn lists_employees() {
    let mut session = session_with_tables();
    let payroll = session.create_department("Payroll", "Building A").unwrap();
    let hr = session.create_department("Human Resources", "Building C").unwrap();

    let kai = session.create_employee("Kai", "Accountant", id_of(&payroll)).unwrap();
    let lee = session.create_employee("Lee", "Clerk", id_of(&payroll)).unwrap();
    session.create_employee("Tal", "Recruiter", id_of(&hr)).unwrap();

    let employees = session.department_employees(&payroll).unwrap();
    assert_eq!(employees.len(), 2);
    assert!(Rc::ptr_eq(&employees[0], &kai));
    assert!(Rc::ptr_eq(&employees[1], &lee));

    let transient = share(Department::new("Legal", "Annex").unwrap());
    assert!(matches!(
        session.department_employees(&transient),
        Err(StoreError::NotPersisted {
            entity: EntityKind::Department
        })
    ));
}
