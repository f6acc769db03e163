mod common;

use common::synthetic_image::{journal_page, journal_params};
use ledger_grid::{collect_inputs, BatchRunner, CsvSink, LedgerDetector};
use std::fs;

#[test]
fn corrupt_page_is_isolated_from_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let pages_dir = dir.path().join("images");
    fs::create_dir(&pages_dir).unwrap();
    let marks: [&[(usize, usize)]; 3] = [&[(1, 1)], &[(2, 3), (5, 5)], &[]];
    for (i, m) in marks.iter().enumerate() {
        journal_page(m)
            .to_gray()
            .save(pages_dir.join(format!("page_{i}.png")))
            .unwrap();
    }
    // sorts between page_1 and page_2
    fs::write(pages_dir.join("page_1_scan.png"), b"\x89PNG truncated").unwrap();

    let csv_path = dir.path().join("out").join("journal.csv");
    let overlay_dir = dir.path().join("out");
    let pages = collect_inputs(&[pages_dir.clone()]).unwrap();
    assert_eq!(pages.len(), 4);

    let runner =
        BatchRunner::new(LedgerDetector::new(journal_params())).with_overlay_dir(&overlay_dir);
    let mut sink = CsvSink::append(&csv_path).unwrap();
    let report = runner.run(&pages, &mut sink).unwrap();
    drop(sink);

    assert_eq!(report.processed(), 3);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("page_1_scan.png"));
    assert_eq!(report.rows_written, 18);
    assert!(!report.interrupted);

    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 18);
    assert!(lines[0].starts_with("file_name,chart_in_file"));
    assert!(lines[1..].iter().all(|l| l.split(',').count() == 37));
    assert!(!text.contains("page_1_scan"));
    let stems: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(&stems[..6], &["page_0"; 6]);
    assert_eq!(&stems[6..12], &["page_1"; 6]);
    assert_eq!(&stems[12..], &["page_2"; 6]);
    // page_1 marks: row 2 day 3, row 5 day 5
    assert_eq!(lines[8], format!("page_1,1,,,2,,,,1{}", ",".repeat(28)));

    for i in 0..3 {
        assert!(overlay_dir.join(format!("page_{i}_out.png")).exists());
    }
    assert!(!overlay_dir.join("page_1_scan_out.png").exists());
}

#[test]
fn second_run_appends_without_a_new_header() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("page.png");
    journal_page(&[]).to_gray().save(&page).unwrap();
    let csv_path = dir.path().join("journal.csv");
    let runner = BatchRunner::new(LedgerDetector::new(journal_params()));

    for _ in 0..2 {
        let mut sink = CsvSink::append(&csv_path).unwrap();
        runner.run(&[page.clone()], &mut sink).unwrap();
    }
    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.matches("file_name").count(), 1);
    assert_eq!(text.lines().count(), 1 + 12);
}

#[cfg(feature = "parallel")]
#[test]
fn interrupted_parallel_batch_writes_a_prefix_of_the_pages() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    let dir = tempfile::tempdir().unwrap();
    let marks: [&[(usize, usize)]; 3] = [&[(1, 1)], &[(3, 2)], &[]];
    let pages: Vec<_> = (0..12)
        .map(|i| {
            let path = dir.path().join(format!("page_{i:02}.png"));
            journal_page(marks[i % 3]).to_gray().save(&path).unwrap();
            path
        })
        .collect();

    let stop = Arc::new(AtomicBool::new(false));
    let runner =
        BatchRunner::new(LedgerDetector::new(journal_params())).with_stop_flag(stop.clone());
    let trigger = {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(40));
            stop.store(true, Ordering::Relaxed);
        })
    };
    let csv_path = dir.path().join("journal.csv");
    let mut sink = CsvSink::append(&csv_path).unwrap();
    let report = runner.run(&pages, &mut sink).unwrap();
    trigger.join().unwrap();
    drop(sink);

    // whatever the timing, the written pages are the leading pages in order
    let written = report.processed();
    assert_eq!(report.interrupted, written < pages.len());
    assert!(report.failures.is_empty());
    let text = fs::read_to_string(&csv_path).unwrap();
    let mut stems: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    stems.dedup();
    let expected: Vec<String> = (0..written).map(|i| format!("page_{i:02}")).collect();
    assert_eq!(stems, expected);
    assert_eq!(report.rows_written, 6 * written);
}
