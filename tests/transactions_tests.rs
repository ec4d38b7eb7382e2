// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::{cli, commands::transactions, db};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::migrate(&mut conn).unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(kind, name, amount, date) VALUES ('expense', 'P', 100, ?1)",
            params![format!("2025-01-0{}", i)],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO transactions(kind, name, amount, date) VALUES ('income', 'pay', 5000, '2025-01-02')",
        [],
    )
    .unwrap();
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pocketledger", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_is_newest_first_with_id_tiebreak() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&[])).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].date, "2025-01-03");
    // 2025-01-02 appears twice; the higher id comes first
    assert!(rows[1].id > rows[2].id);
    assert_eq!(rows[1].date, "2025-01-02");
    assert_eq!(rows[2].date, "2025-01-02");
}

#[test]
fn list_filters_by_kind() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--kind", "income"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "pay");
}

#[test]
fn list_filters_by_month() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--month", "2025-01"])).unwrap();
    assert_eq!(rows.len(), 4);
    let rows = transactions::query_rows(&conn, &list_matches(&["--month", "2025-02"])).unwrap();
    assert!(rows.is_empty());
}
