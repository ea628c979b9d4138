mod common;

use common::setup_test_db;
use techinvoice::core::{DraftStore, HistoryLog, NumberingService};
use techinvoice::db::DbPool;
use techinvoice::export::{ExportFormat, ExportLogic, ExportRequest};
use techinvoice::models::{HeaderField, ItemInput, Technician};
use std::env;

fn jane() -> Technician {
    Technician::new("Jane Doe", "BHM", "12")
}

#[test]
fn test_draft_and_counters_survive_reopen() {
    let db_path = setup_test_db("store_reopen");

    {
        let pool = DbPool::new(&db_path).expect("open db");
        let mut drafts = DraftStore::open(&pool).expect("open draft");
        drafts
            .set_header_field(HeaderField::Technician(Some(jane())))
            .expect("set tech");
        drafts
            .add_item(&mut ItemInput::new("Rekey", Some(45.0)))
            .expect("add item");

        let mut numbering = NumberingService::new(&pool);
        assert_eq!(numbering.next_number(Some(&jane())).expect("number"), "BHM-12-0001");
    }

    let pool = DbPool::new(&db_path).expect("reopen db");
    let mut drafts = DraftStore::open(&pool).expect("reopen draft");
    assert_eq!(drafts.draft().items.len(), 1);
    assert_eq!(drafts.compute_total(), 45.0);

    // resetting the draft leaves counters alone
    drafts.reset().expect("reset");
    let numbering = NumberingService::new(&pool);
    assert_eq!(
        numbering.preview_next(Some(&jane())).expect("preview"),
        "BHM-12-0002"
    );
}

#[test]
fn test_finalize_against_sqlite() {
    let db_path = setup_test_db("store_finalize");
    let pool = DbPool::new(&db_path).expect("open db");

    let mut drafts = DraftStore::open(&pool).expect("open draft");
    let mut numbering = NumberingService::new(&pool);
    let mut history = HistoryLog::new(&pool);

    drafts
        .set_header_field(HeaderField::Technician(Some(jane())))
        .expect("set tech");
    drafts
        .add_item(&mut ItemInput::new("Rekey", Some(45.0)))
        .expect("add");
    drafts
        .add_item(&mut ItemInput::new("Service fee", Some(25.0)))
        .expect("add");

    let request = ExportRequest {
        format: ExportFormat::Json,
        file: None,
        export_dir: env::temp_dir().join("techinvoice_store_finalize"),
        force: true,
    };

    let outcome = ExportLogic::finalize(&mut drafts, &mut numbering, &mut history, &request)
        .expect("finalize");
    assert_eq!(outcome.invoice.invoice_number, "BHM-12-0001");
    assert_eq!(outcome.invoice.total, 70.0);
    assert!(outcome.path.ends_with("BHM-12-0001.json"));

    let stored = history.find("BHM-12-0001").expect("find").expect("present");
    assert_eq!(stored.items.len(), 2);
    assert!(drafts.draft().is_empty());
}
