mod common;

use common::{init_db, init_db_with_draft, setup_test_db, ti};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_draft_survives_between_invocations() {
    let db_path = setup_test_db("draft_persist");
    init_db_with_draft(&db_path);

    ti().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("Jane Doe (BHM, #12)"))
        .stdout(contains("Sunrise Apartments"))
        .stdout(contains("PO-778"))
        .stdout(contains("Rekey"))
        .stdout(contains("Total: 70.00"))
        .stdout(contains("Must call before service"));
}

#[test]
fn test_item_add_rejects_invalid_prices() {
    let db_path = setup_test_db("item_invalid");
    init_db(&db_path);

    for price in ["0", "-5", "abc"] {
        ti().args(["--db", &db_path, "item", "add", "Rekey", price])
            .assert()
            .failure()
            .stderr(contains("Rejected"));
    }

    ti().args(["--db", &db_path, "item", "add", "   ", "10"])
        .assert()
        .failure()
        .stderr(contains("Rejected"));

    ti().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("(no items)"))
        .stdout(contains("Total: 0.00"));
}

#[test]
fn test_item_edit_and_delete() {
    let db_path = setup_test_db("item_edit_del");
    init_db_with_draft(&db_path);

    ti().args(["--db", &db_path, "item", "edit", "1", "--price", "50"])
        .assert()
        .success()
        .stdout(contains("Total: 75.00"));

    // invalid price text on edit becomes 0
    ti().args(["--db", &db_path, "item", "edit", "2", "--price", "abc"])
        .assert()
        .success()
        .stdout(contains("Total: 50.00"));

    ti().args(["--db", &db_path, "item", "edit", "1", "--desc", ""])
        .assert()
        .failure()
        .stderr(contains("Rejected"));

    ti().args(["--db", &db_path, "item", "del", "1"])
        .assert()
        .success()
        .stdout(contains("Total: 0.00"));
}

#[test]
fn test_item_out_of_range() {
    let db_path = setup_test_db("item_range");
    init_db_with_draft(&db_path);

    ti().args(["--db", &db_path, "item", "edit", "5", "--price", "10"])
        .assert()
        .failure()
        .stderr(contains("does not exist"));

    // deleting a missing item is a no-op
    ti().args(["--db", &db_path, "item", "del", "5"])
        .assert()
        .success()
        .stdout(contains("nothing deleted"))
        .stdout(contains("Total: 70.00"));
}

#[test]
fn test_account_market_eligibility() {
    let db_path = setup_test_db("account_market");
    init_db(&db_path);

    ti().args(["--db", &db_path, "set", "--tech", "Jane Doe"])
        .assert()
        .success();

    // ABC Properties bills only in TPA
    ti().args(["--db", &db_path, "set", "--account", "ABC Properties"])
        .assert()
        .failure()
        .stderr(contains("not available in market BHM"));

    // "All" accounts are eligible everywhere
    ti().args(["--db", &db_path, "set", "--account", "1 Stop Maintenance"])
        .assert()
        .success()
        .stdout(contains("Bill net 30, service fee waived"));

    ti().args(["--db", &db_path, "set", "--account", "Sunrise Apartments"])
        .assert()
        .success();

    // moving to a TPA technician clears the BHM-only account
    ti().args(["--db", &db_path, "set", "--tech", "John Smith"])
        .assert()
        .success()
        .stdout(contains("was cleared"));
}

#[test]
fn test_unknown_technician() {
    let db_path = setup_test_db("unknown_tech");
    init_db(&db_path);

    ti().args(["--db", &db_path, "set", "--tech", "Nobody"])
        .assert()
        .failure()
        .stderr(contains("Unknown technician"));
}

#[test]
fn test_reset_discards_draft() {
    let db_path = setup_test_db("reset");
    init_db_with_draft(&db_path);

    ti().args(["--db", &db_path, "reset", "--force"])
        .assert()
        .success()
        .stdout(contains("Draft discarded"));

    ti().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("(no items)"));

    ti().args(["--db", &db_path, "reset"])
        .assert()
        .success()
        .stdout(contains("already empty"));
}

#[test]
fn test_rejected_item_edit_changes_nothing() {
    let db_path = setup_test_db("item_edit_atomic");
    init_db_with_draft(&db_path);

    ti().args([
        "--db", &db_path, "item", "edit", "1", "--desc", "CHANGED", "--price", "-3",
    ])
    .assert()
    .failure()
    .stderr(contains("Rejected"));

    ti().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("Rekey"))
        .stdout(contains("CHANGED").not())
        .stdout(contains("Total: 70.00"));
}

#[test]
fn test_rejected_set_changes_nothing() {
    let db_path = setup_test_db("set_atomic");
    init_db_with_draft(&db_path);

    // John Smith works in TPA, Sunrise Apartments only bills in BHM
    ti().args([
        "--db",
        &db_path,
        "set",
        "--tech",
        "John Smith",
        "--account",
        "Sunrise Apartments",
    ])
    .assert()
    .failure()
    .stderr(contains("not available in market TPA"));

    ti().args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("Jane Doe (BHM, #12)"))
        .stdout(contains("Sunrise Apartments"));
}
