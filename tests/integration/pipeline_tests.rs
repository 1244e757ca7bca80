//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve course pages and run the full
//! fetch, extract, aggregate and write cycle end-to-end.

use std::path::Path;
use tempfile::TempDir;
use timetable_scraper::config::Config;
use timetable_scraper::crawler::{Coordinator, RunOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSI2110_PAGE: &str = r#"<html><head><title>Timetable</title></head><body>
<div id="main-content">
    <h1>CSI2110 - Data Structures and Algorithms</h1>
    <div id="schedule">
        <div class="schedule" id="2149">
            <table>
                <tr><td class="Section" colspan="4">CSI2110 A<br/>Fall Term</td></tr>
                <tr>
                    <td class="Activity">Lecture 1</td>
                    <td class="Day">Monday 08:30 - 10:00</td>
                    <td class="Place">SMD 224</td>
                    <td class="Professor">Jane Doe</td>
                </tr>
                <tr>
                    <td class="Activity">Laboratory 1</td>
                    <td class="Day">Wednesday 14:30 - 16:00</td>
                    <td class="Place">Not available at this time.</td>
                    <td class="Professor">&nbsp;</td>
                </tr>
                <tr class="footer"><td colspan="4">Only one laboratory must be taken.</td></tr>
            </table>
        </div>
    </div>
</div>
</body></html>"#;

const MAT1348_PAGE: &str = r#"<html><body>
<div id="main-content">
    <h1>MAT1348 - Discrete Mathematics for Computing</h1>
    <div id="schedule"></div>
</div>
</body></html>"#;

const PHI1101_PAGE: &str = r#"<html><body>
<div id="main-content">
    <h1>PHI1101 - Reasoning, Logic and Argument</h1>
    <div id="schedule">
        <div class="schedule" id="2151">
            <table>
                <tr><td class="Section">PHI1101 B</td></tr>
                <tr>
                    <td class="Activity">Lecture 2</td>
                    <td class="Day">Tuesday 10:00 - 11:30</td>
                    <td class="Place">MRT 205</td>
                    <td class="Professor">John Smith</td>
                </tr>
            </table>
        </div>
    </div>
</div>
</body></html>"#;

async fn mount_page(server: &MockServer, code: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/Course.aspx"))
        .and(query_param("code", code))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Creates a test configuration writing every file inside `dir`
fn create_test_config(server: &MockServer, dir: &Path) -> Config {
    let file = |name: &str| dir.join(name).display().to_string();

    let mut config = Config::default();
    config.source.base_url = format!("{}/Course.aspx", server.uri());
    config.source.courses_file = file("courses.txt");
    config.source.skipped_file = file("skippedCourses.txt");
    config.scraper.workers = Some(2);
    config.scraper.server_error_delay_ms = 5;
    config.scraper.network_error_delay_ms = 5;
    config.output.courses_path = file("db_courses.csv");
    config.output.sections_path = file("db_sections.csv");
    config.output.activities_path = file("db_activities.csv");
    config
}

fn read_lines(path: &str) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_end_to_end_course_and_skip() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "CSI2110", CSI2110_PAGE).await;
    mount_page(&mock_server, "MAT1348", MAT1348_PAGE).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, dir.path());
    std::fs::write(&config.source.courses_file, "CSI2110\nMAT1348\n").unwrap();

    let options = RunOptions::from_flags(&config, false, false);
    let coordinator = Coordinator::new(config.clone()).expect("Failed to create coordinator");
    let summary = coordinator.run(&options).await.expect("Scrape failed");

    assert_eq!(summary.requested, 2);
    assert_eq!(summary.courses, 1);
    assert_eq!(summary.sections, 1);
    assert_eq!(summary.activities, 2);
    assert_eq!(summary.skipped.len(), 1);

    assert_eq!(
        read_lines(&config.output.courses_path),
        vec!["CSI2110,Data Structures and Algorithms"]
    );
    assert_eq!(
        read_lines(&config.output.sections_path),
        vec!["CSI2110A,CSI2110,2149,0,0,1"]
    );
    assert_eq!(
        read_lines(&config.output.activities_path),
        vec![
            "Lecture,1,CSI2110A,2149,Monday,08:30,10:00,SMD 224,Jane Doe",
            "Laboratory,1,CSI2110A,2149,Wednesday,14:30,16:00,N/A,N/A",
        ]
    );
    assert_eq!(read_lines(&config.source.skipped_file), vec!["MAT1348"]);
}

#[tokio::test]
async fn test_server_errors_route_to_skip_list() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "CSI2110", CSI2110_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/Course.aspx"))
        .and(query_param("code", "SEG2105"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, dir.path());
    std::fs::write(&config.source.courses_file, "SEG2105\nCSI2110\n").unwrap();

    let options = RunOptions::from_flags(&config, false, false);
    let summary = Coordinator::new(config.clone())
        .unwrap()
        .run(&options)
        .await
        .unwrap();

    assert_eq!(summary.courses, 1);
    assert_eq!(
        summary.skipped[0].to_string(),
        "SEG2105, ran out of retries, HTTPError"
    );
    assert_eq!(read_lines(&config.source.skipped_file), vec!["SEG2105"]);

    // Exactly five attempts for the failing course
    mock_server.verify().await;
}

#[tokio::test]
async fn test_skipped_rerun_appends_to_existing_data() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "CSI2110", CSI2110_PAGE).await;
    mount_page(&mock_server, "PHI1101", PHI1101_PAGE).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, dir.path());

    // First run: PHI1101 is not served yet by the list, only CSI2110
    std::fs::write(&config.source.courses_file, "CSI2110\n").unwrap();
    let full = RunOptions::from_flags(&config, false, false);
    Coordinator::new(config.clone())
        .unwrap()
        .run(&full)
        .await
        .unwrap();

    // Rerun over a hand-written skip list
    std::fs::write(&config.source.skipped_file, "PHI1101\n").unwrap();
    let rerun = RunOptions::from_flags(&config, true, false);
    assert!(!rerun.clear_existing);
    let summary = Coordinator::new(config.clone())
        .unwrap()
        .run(&rerun)
        .await
        .unwrap();

    assert_eq!(summary.courses, 1);
    assert!(summary.skipped.is_empty());
    assert_eq!(
        read_lines(&config.output.courses_path),
        vec![
            "CSI2110,Data Structures and Algorithms",
            "PHI1101,\"Reasoning, Logic and Argument\"",
        ]
    );
    assert_eq!(read_lines(&config.output.sections_path).len(), 2);
    assert!(read_lines(&config.source.skipped_file).is_empty());
}

#[tokio::test]
async fn test_sorted_output_with_many_workers() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "CSI2110", CSI2110_PAGE).await;
    mount_page(&mock_server, "PHI1101", PHI1101_PAGE).await;
    mount_page(&mock_server, "MAT1348", MAT1348_PAGE).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, dir.path());
    config.scraper.workers = Some(8);
    config.output.sort_output = true;
    std::fs::write(&config.source.courses_file, "PHI1101\nMAT1348\nCSI2110\n").unwrap();

    let options = RunOptions::from_flags(&config, false, false);
    let summary = Coordinator::new(config.clone())
        .unwrap()
        .run(&options)
        .await
        .unwrap();

    assert_eq!(summary.courses, 2);
    assert_eq!(summary.activities, 3);
    let courses = read_lines(&config.output.courses_path);
    assert!(courses[0].starts_with("CSI2110,"));
    assert!(courses[1].starts_with("PHI1101,"));
}
