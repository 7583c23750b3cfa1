use tabql::config::{Config, MissingColumns, RaggedRows};
use tabql::query::{pipeline_with, project_with, Step};
use tabql::{
    parse, parse_with, pipeline, project, rename, restrict, Condition, ParseError, Pipeline,
    QueryError, Record, Sequence, Table, Value,
};

const PEOPLE: &str = "name,age,hair\nMerble,35,red\nBob,64,blonde";
const LIBRARY: &str = "\
title,isbn,ed
SICP,0262010771,1
SICP,0262510871,2
The Joy of Clojure,1935182641,1
";

fn library() -> Table {
    parse(LIBRARY).unwrap()
}

fn edition_above_one(record: &Record) -> bool {
    record
        .get("edition")
        .and_then(Value::as_number)
        .is_some_and(|ed| ed > 1.0)
}

#[test]
fn parse_people_scenario() {
    let table = parse(PEOPLE).unwrap();
    assert_eq!(
        table.records(),
        [
            Record::from_iter([("name", "Merble"), ("age", "35"), ("hair", "red")]),
            Record::from_iter([("name", "Bob"), ("age", "64"), ("hair", "blonde")]),
        ]
    );
}

#[test]
fn project_people_scenario() {
    let table = project(&parse(PEOPLE).unwrap(), &["name", "age"]).unwrap();
    assert_eq!(
        table.records(),
        [
            Record::from_iter([("name", "Merble"), ("age", "35")]),
            Record::from_iter([("name", "Bob"), ("age", "64")]),
        ]
    );
}

#[test]
fn rename_then_project_scenario() {
    let renamed = rename(&library(), &[("ed", "edition")]).unwrap();
    let editions = project(&renamed, &["edition"]).unwrap();
    assert_eq!(
        editions.records(),
        [
            Record::new().with("edition", "1"),
            Record::new().with("edition", "2"),
            Record::new().with("edition", "1"),
        ]
    );

    let later = restrict(&renamed, edition_above_one);
    assert_eq!(later.len(), 1);
    assert_eq!(later.records()[0].get("edition"), Some(&Value::from("2")));
    assert_eq!(later.records()[0].get("isbn"), Some(&Value::from("0262510871")));
}

#[test]
fn condition_drives_the_same_restriction() {
    let renamed = rename(&library(), &[("ed", "edition")]).unwrap();
    let condition = Condition::parse("edition > 1").unwrap();
    assert_eq!(
        restrict(&renamed, |r| condition.matches(r)),
        restrict(&renamed, edition_above_one)
    );
}

#[test]
fn header_round_trip() {
    let header = ["name", "age", "hair"];
    let table = parse(PEOPLE).unwrap();
    let projected = project(&table, &header).unwrap();
    assert_eq!(projected.columns(), header);
    for record in &projected {
        assert_eq!(record.names().collect::<Vec<_>>(), header);
    }
    assert_eq!(projected, table);
}

#[test]
fn projection_is_idempotent() {
    let table = library();
    for columns in [vec!["isbn"], vec!["ed", "title"], vec!["missing", "title"], vec![]] {
        let once = project(&table, &columns).unwrap();
        assert_eq!(project(&once, &columns).unwrap(), once);
    }
}

#[test]
fn restriction_is_monotonic() {
    let table = library();
    let predicates: [fn(&Record) -> bool; 3] = [
        |_| false,
        |r| r.get("title") == Some(&Value::from("SICP")),
        |r| r.get("isbn").is_some(),
    ];
    for predicate in predicates {
        assert!(restrict(&table, predicate).len() <= table.len());
    }
    assert_eq!(restrict(&table, |_| true), table);
}

#[test]
fn restrictions_compose_as_conjunction() {
    let table = library();
    let p1 = |r: &Record| r.get("title") == Some(&Value::from("SICP"));
    let p2 = |r: &Record| r.get("ed") == Some(&Value::from("1"));
    assert_eq!(
        restrict(&restrict(&table, p1), p2),
        restrict(&table, |r| p1(r) && p2(r))
    );
}

#[test]
fn rename_conflict_is_deterministic() {
    for _ in 0..10 {
        let renamed = rename(&library(), &[("ed", "x"), ("ed", "y")]).unwrap();
        for (before, after) in library().iter().zip(&renamed) {
            assert!(!after.contains("x"));
            assert_eq!(after.get("y"), before.get("ed"));
        }
    }
}

#[test]
fn operations_preserve_row_order() {
    let table = library();
    let isbns = |t: &Table| -> Vec<String> {
        t.iter()
            .filter_map(|r| r.get("isbn").map(|v| v.to_string()))
            .collect()
    };
    let original = isbns(&table);

    assert_eq!(isbns(&project(&table, &["isbn"]).unwrap()), original);
    assert_eq!(isbns(&rename(&table, &[("title", "name")]).unwrap()), original);

    let kept = isbns(&restrict(&table, |r| r.get("ed") == Some(&Value::from("1"))));
    assert_eq!(kept, [original[0].clone(), original[2].clone()]);
}

#[test]
fn pipeline_matches_manual_chain() {
    let table = library();
    let manual = restrict(
        &project(
            &rename(&table, &[("ed", "edition")]).unwrap(),
            &["title", "isbn", "edition"],
        )
        .unwrap(),
        edition_above_one,
    );

    let steps = [
        Step::rename([("ed", "edition")]),
        Step::project(["title", "isbn", "edition"]),
        Step::restrict(edition_above_one),
    ];
    assert_eq!(pipeline(&table, &steps).unwrap(), manual);

    let built = Pipeline::new()
        .rename([("ed", "edition")])
        .project(["title", "isbn", "edition"])
        .restrict(edition_above_one);
    assert_eq!(built.run(&table).unwrap(), manual);
}

#[test]
fn strict_policies() {
    let strict = Config::default()
        .with_ragged_rows(RaggedRows::Reject)
        .with_missing_columns(MissingColumns::Reject);

    assert!(matches!(
        parse_with("a,b\n1", &strict),
        Err(ParseError::RaggedRow { .. })
    ));

    let table = parse_with(PEOPLE, &strict).unwrap();
    assert!(matches!(
        project_with(&table, &["name", "height"], &strict),
        Err(QueryError::UnknownColumn(_))
    ));
    assert!(matches!(
        pipeline_with(&table, &[Step::project(["height"])], &strict),
        Err(QueryError::UnknownColumn(_))
    ));
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(parse(""), Err(ParseError::EmptyInput)));
}

#[test]
fn tables_share_across_threads() {
    let table = std::sync::Arc::new(library());
    let query = Pipeline::new().restrict(|r| r.get("ed") == Some(&Value::from("1")));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = table.clone();
            let query = query.clone();
            std::thread::spawn(move || query.run(&table).unwrap().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
