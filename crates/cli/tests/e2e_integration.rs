//! End-to-end tests for a ReviewDesk turn.
//!
//! Files are read from disk, ingested, sent through the orchestrator to a
//! scripted provider, and the generated files are decoded and read back.

use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

use calamine::{Data, Reader, Xlsx};
use reviewdesk_agent::{Orchestrator, ReviewSession, TurnRequest};
use reviewdesk_codec::egress::{MSWORD_MIME, XLSX_MIME};
use reviewdesk_codec::xlsx::WorkbookWriter;
use reviewdesk_codec::{encoding, ingest_paths, sheet};
use reviewdesk_core::content::Part;
use reviewdesk_core::error::ProviderError;
use reviewdesk_core::event::{DomainEvent, EventBus};
use reviewdesk_core::message::Conversation;
use reviewdesk_core::mode::{OutputMode, RequestedFileType};
use reviewdesk_core::provider::{
    Candidate, Provider, ProviderRequest, ProviderResponse, ReplyPart, Usage,
};
use reviewdesk_core::tool::FunctionCall;

// ── Mock Provider ────────────────────────────────────────────────────────

/// Replays scripted outcomes in sequence and keeps every request.
struct ScriptedProvider {
    outcomes: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(outcomes: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let outcomes = self.outcomes.lock().unwrap();
        let index = requests.len();
        if index >= outcomes.len() {
            panic!("ScriptedProvider exhausted: call #{index}, have {}", outcomes.len());
        }
        requests.push(request);
        outcomes[index].clone()
    }
}

fn reply(parts: Vec<ReplyPart>) -> ProviderResponse {
    ProviderResponse {
        candidates: vec![Candidate {
            parts,
            finish_reason: Some("STOP".into()),
        }],
        usage: Some(Usage {
            prompt_tokens: 100,
            completion_tokens: 40,
            total_tokens: 140,
        }),
        model: "mock-model".into(),
    }
}

fn file_call(filename: &str, content: &str, mime: &str) -> ReplyPart {
    ReplyPart::FunctionCall(FunctionCall::new(
        "generate_file",
        serde_json::json!({ "filename": filename, "content": content, "mimeType": mime }),
    ))
}

fn write_workbook(path: &std::path::Path, sheets: &[(&str, &str)]) {
    let mut writer = WorkbookWriter::new();
    for (name, csv) in sheets {
        writer.add_sheet(name, sheet::parse_csv(csv).unwrap());
    }
    std::fs::write(path, writer.to_bytes().unwrap()).unwrap();
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn documents_in_files_out() {
    let dir = tempfile::tempdir().unwrap();
    let memo = dir.path().join("memo.txt");
    let ledger = dir.path().join("ledger.xlsx");
    let broken = dir.path().join("broken.xls");
    std::fs::write(&memo, "Vendor must deliver by 1 March.").unwrap();
    write_workbook(&ledger, &[("Fees", "item,fee\nAudit,1200\nLegal,800"), ("Notes", "note\nok")]);
    std::fs::write(&broken, b"not a workbook").unwrap();

    let attachments = ingest_paths(&[memo, broken, ledger]).await;
    assert_eq!(attachments.len(), 2);

    let provider = Arc::new(ScriptedProvider::new(vec![Ok(reply(vec![
        ReplyPart::Text("Fees total 2000. ".into()),
        file_call("fees.xlsx", "item,fee\nAudit,1200\nLegal,800\nTotal,2000", "text/csv"),
        ReplyPart::Text("See the report.".into()),
        file_call("report.docx", "<h1>Review</h1><p>Delivery date is firm.</p>", "text/html"),
    ]))]));
    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();

    let orchestrator = Orchestrator::new(provider.clone()).with_event_bus(bus);
    let mut session = ReviewSession::new(orchestrator, Conversation::new("Vendor audit"))
        .with_mode(OutputMode::TextAndFile)
        .with_requested_type(RequestedFileType::Auto);
    session.stage(attachments);

    let turn = session.submit("Total the fees and write a report").await.unwrap();
    assert!(!turn.is_failed());
    assert_eq!(turn.text, "Fees total 2000. See the report.");

    // What went to the model
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tools.len(), 1);
    let parts = &requests[0].contents.last().unwrap().parts;
    assert_eq!(parts.len(), 3);
    match &parts[1] {
        Part::InlineData { inline_data } => {
            assert_eq!(inline_data.mime_type, "text/plain");
            let text = encoding::decode_text(&inline_data.data).unwrap();
            assert!(text.starts_with("Filename: ledger.xlsx\n\n--- Sheet: Fees ---\n"));
            assert!(text.contains("--- Sheet: Notes ---\nnote\nok"));
        }
        other => panic!("Expected inline spreadsheet text, got {other:?}"),
    }
    let instruction = parts[2].as_text().unwrap();
    assert!(instruction.starts_with("Total the fees and write a report\n[SYSTEM: The user requested BOTH"));

    // What came back
    assert_eq!(turn.generated_files.len(), 2);
    let workbook = &turn.generated_files[0];
    assert_eq!(workbook.name, "fees.xlsx");
    assert_eq!(workbook.mime_type, XLSX_MIME);

    let bytes = encoding::decode(&workbook.data).unwrap();
    let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(xlsx.sheet_names().to_vec(), vec!["Sheet1".to_string()]);
    let range = xlsx.worksheet_range("Sheet1").unwrap();
    assert_eq!(range.get_size(), (4, 2));
    assert_eq!(range.get_value((3, 0)), Some(&Data::String("Total".into())));
    assert_eq!(range.get_value((3, 1)), Some(&Data::Float(2000.0)));

    let doc = &turn.generated_files[1];
    assert_eq!(doc.name, "report.docx");
    assert_eq!(doc.mime_type, MSWORD_MIME);
    let html = encoding::decode_text(&doc.data).unwrap();
    assert!(html.contains("<body><h1>Review</h1><p>Delivery date is firm.</p></body>"));

    // History holds exactly this turn
    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].attachments.len(), 2);
    assert_eq!(messages[1].generated_files.len(), 2);

    let mut generated = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(*event, DomainEvent::FileGenerated { .. }) {
            generated += 1;
        }
    }
    assert_eq!(generated, 2);
}

#[tokio::test]
async fn workbook_container_has_the_expected_parts() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(reply(vec![file_call(
        "table.xlsx",
        "a,b\n1,2",
        "text/csv",
    )]))]));
    let turn = Orchestrator::new(provider)
        .run_turn(&[], &TurnRequest::new("table").with_mode(OutputMode::FileOnly))
        .await;
    assert_eq!(turn.text, "File generated successfully.");

    let bytes = encoding::decode(&turn.generated_files[0].data).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing {name}");
    }
    let mut types = String::new();
    archive
        .by_name("[Content_Types].xml")
        .unwrap()
        .read_to_string(&mut types)
        .unwrap();
    assert!(types.contains("spreadsheetml.sheet.main+xml"));
}

#[tokio::test]
async fn failure_then_recovery_keeps_history_consistent() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Err(ProviderError::RateLimited {
            retry_after_secs: 5,
        }),
        Ok(reply(vec![ReplyPart::Text("Recovered.".into())])),
    ]));
    let mut session = ReviewSession::new(Orchestrator::new(provider.clone()), Conversation::default());

    let first = session.submit("First try").await.unwrap();
    assert!(first.is_failed());
    assert!(first.text.starts_with("Error during processing:"));
    assert!(first.generated_files.is_empty());

    let second = session.submit("Second try").await.unwrap();
    assert_eq!(second.text, "Recovered.");

    // The second request replays the failed exchange, then the new turn
    let contents = &provider.requests()[1].contents;
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0].parts[0].as_text(), Some("First try"));
    assert!(contents[1].parts[0].as_text().unwrap().starts_with("Error during processing:"));
    assert_eq!(contents[2].parts[0].as_text(), Some("Second try"));
    assert_eq!(session.conversation().len(), 4);
}
