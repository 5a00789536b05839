//! End-to-end statement construction: SELECT scenarios, CREATE TABLE from
//! schemas, and batch INSERT templates in each dialect.

use medrec_sql_core::{
    Column, Condition, Direction, MySqlDialect, PostgresDialect, SqlError, SqlType, Statement,
    StatementBuilder, TableSchema,
};

fn patient_schema() -> TableSchema {
    TableSchema::builder("PATIENT")
        .column("insurance_no", SqlType::Varchar)
        .column("fname", SqlType::Varchar)
        .column("lname", SqlType::Varchar)
        .column("age", SqlType::Int)
        .column("related_docs", SqlType::Text)
        .constraint("PRIMARY KEY (insurance_no) ")
        .build()
        .expect("valid schema")
}

#[test]
fn select_joins_columns_with_commas() {
    let builder = StatementBuilder::new();
    for (columns, expected) in [
        (vec!["a"], "SELECT a FROM t;"),
        (vec!["a", "b", "c"], "SELECT a,b,c FROM t;"),
        (vec!["*"], "SELECT * FROM t;"),
    ] {
        assert_eq!(builder.select(&columns, "t").unwrap().construct_query(), expected);
    }
}

#[test]
fn select_with_intersection_and_union() {
    let col1 = Column::new("col1", SqlType::Varchar);
    let col2 = Column::new("col2", SqlType::Varchar);

    let sql = StatementBuilder::new()
        .select(&["col1", "col2"], "table")
        .unwrap()
        .conditions(
            &[Condition::eq(&col1, "val1")],
            &[Condition::lte(&col2, "val2")],
        )
        .unwrap()
        .construct_query();

    assert_eq!(
        sql,
        "SELECT col1,col2 FROM table WHERE  table.col1 = 'val1' AND  table.col2 <= 'val2';"
    );
}

#[test]
fn conditions_resolve_types_through_schema() {
    let schema = patient_schema();
    let age = schema.column("age").unwrap();
    let lname = schema.column("lname").unwrap();

    let sql = StatementBuilder::new()
        .select(&["fname", "lname"], schema.name())
        .unwrap()
        .conditions(&[Condition::gte(age, 30), Condition::like(lname, "Lo%")], &[])
        .unwrap()
        .order_by("lname", Direction::Asc)
        .unwrap()
        .limit(100)
        .offset(0)
        .construct_query();

    assert_eq!(
        sql,
        "SELECT fname,lname FROM PATIENT WHERE  PATIENT.age >= 30 AND  PATIENT.lname LIKE 'Lo%' \
         ORDER BY lname ASC LIMIT 100 OFFSET 0;"
    );
}

#[test]
fn both_groups_are_always_kept() {
    let label = Column::new("label", SqlType::Varchar);
    let no = Column::new("insurance_no", SqlType::Varchar);

    let sql = StatementBuilder::new()
        .select(&["*"], "INTERACTION")
        .unwrap()
        .conditions(
            &[Condition::eq(&no, "111")],
            &[
                Condition::eq(&label, "Cough"),
                Condition::eq(&label, "Fever"),
                Condition::eq(&label, "Flu"),
            ],
        )
        .unwrap()
        .construct_query();

    assert_eq!(
        sql,
        "SELECT * FROM INTERACTION WHERE  INTERACTION.insurance_no = '111' AND \
         (INTERACTION.label = 'Cough' OR  INTERACTION.label = 'Fever' OR  INTERACTION.label = 'Flu');"
    );
}

#[test]
fn empty_conditions_fail() {
    let err = StatementBuilder::new()
        .select(&["*"], "t")
        .unwrap()
        .conditions(&[], &[])
        .unwrap_err();
    assert!(matches!(err, SqlError::InvalidQuery(_)));
}

#[test]
fn each_top_level_call_starts_fresh() {
    let builder = StatementBuilder::new();
    let first = builder.select(&["a"], "t1").unwrap().limit(5);
    let second = builder.select(&["b"], "t2").unwrap();

    assert_eq!(first.construct_query(), "SELECT a FROM t1 LIMIT 5;");
    assert_eq!(second.construct_query(), "SELECT b FROM t2;");
    assert_eq!(
        builder.insert_batch("t3", &["c"]).unwrap().construct_query(),
        "INSERT INTO t3 (c) VALUES (?);"
    );
}

#[test]
fn create_contains_every_column_and_constraint_in_order() {
    let schema = TableSchema::builder("INTERACTION")
        .column("id", SqlType::Int)
        .column("insurance_no", SqlType::Varchar)
        .column("interaction_date", SqlType::Date)
        .column("qa", SqlType::Text)
        .constraint("PRIMARY KEY (id)")
        .constraint("FOREIGN KEY (insurance_no) REFERENCES PATIENT(insurance_no) ")
        .build()
        .unwrap();

    let sql = StatementBuilder::new().create(&schema).construct_query();

    for column in schema.columns() {
        assert_eq!(sql.matches(&column.definition()).count(), 1);
    }
    let first = sql.find("PRIMARY KEY (id)").unwrap();
    let second = sql.find("FOREIGN KEY (insurance_no)").unwrap();
    assert!(first < second);
    assert_eq!(
        sql,
        "CREATE TABLE IF NOT EXISTS INTERACTION (id INT,insurance_no VARCHAR(255),\
         interaction_date DATE,qa TEXT, PRIMARY KEY (id), \
         FOREIGN KEY (insurance_no) REFERENCES PATIENT(insurance_no) );"
    );
}

#[test]
fn create_without_constraints() {
    let schema = TableSchema::builder("t")
        .column("a", SqlType::Int)
        .build()
        .unwrap();
    assert_eq!(
        StatementBuilder::new().create(&schema).construct_query(),
        "CREATE TABLE IF NOT EXISTS t (a INT);"
    );
}

#[test]
fn insert_has_one_marker_per_column() {
    let schema = patient_schema();
    let columns = schema.column_names();

    let insert = StatementBuilder::new()
        .insert_batch(schema.name(), &columns)
        .unwrap();
    assert_eq!(insert.placeholder_count(), columns.len());
    assert_eq!(insert.as_sql().matches('?').count(), columns.len());
    assert_eq!(
        insert.construct_query(),
        "INSERT INTO PATIENT (insurance_no,fname,lname,age,related_docs) VALUES (?,?,?,?,?);"
    );

    let mysql = StatementBuilder::with_dialect(MySqlDialect)
        .insert_batch("table", &["col1", "col2"])
        .unwrap();
    assert_eq!(mysql.construct_query(), "INSERT INTO table (col1,col2) VALUES (%s,%s);");

    let pg = StatementBuilder::with_dialect(PostgresDialect)
        .insert_batch("table", &["col1", "col2"])
        .unwrap();
    assert_eq!(pg.construct_query(), "INSERT INTO table (col1,col2) VALUES ($1,$2);");
}

#[test]
fn schema_validation_fails_fast() {
    assert!(matches!(
        TableSchema::new("", vec![Column::new("a", SqlType::Int)], vec![]),
        Err(SqlError::InvalidSchema(_))
    ));
    assert!(matches!(
        TableSchema::new("t", vec![], vec![]),
        Err(SqlError::InvalidSchema(_))
    ));
    assert!(matches!(
        TableSchema::new(
            "t",
            vec![Column::new("a", SqlType::Int), Column::new("a", SqlType::Text)],
            vec![]
        ),
        Err(SqlError::InvalidSchema(_))
    ));
}
