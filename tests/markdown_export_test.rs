use std::fs;

use insta::assert_snapshot;
use mdreport::cli::commands::{export_from_reader, ExportStats};
use mdreport::{Exporter, MarkdownExporter, MarkdownOptions};
use tempfile::TempDir;

const FINDINGS: &str = r#"{"template-id":"git-config","info":{"name":"Git Config File","author":"pdteam","tags":"config,git,exposure","severity":"medium","reference":["https://example.org/git"]},"matcher-name":"body","type":"http","host":"https://app.example.com","matched-at":"https://app.example.com/.git/config","timestamp":"2024-03-04T05:06:07Z"}
{"template-id":"http/tech:nginx version","info":{"name":"Nginx Version","severity":"info"},"extractor-name":"version","type":"http","host":"10.0.0.5","extracted-results":["1.18.0"]}
{"template-id":"git-config","info":{"name":"Git Config File","severity":"medium"},"matcher-name":"body","type":"http","host":"https://other.example.com"}
"#;

fn exporter_in(dir: &std::path::Path) -> MarkdownExporter {
    MarkdownExporter::new(MarkdownOptions::new(dir.to_string_lossy())).unwrap()
}

#[tokio::test]
async fn test_export_jsonl_stream_to_markdown() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let out = temp_dir.path().join("reports");
    let mut exporter = exporter_in(&out);

    let stats = export_from_reader(FINDINGS.as_bytes(), &mut exporter, true).await?;
    exporter.close()?;

    assert_eq!(stats, ExportStats { exported: 3, skipped: 0 });

    let index = fs::read_to_string(out.join("index.md"))?;
    assert_snapshot!(index, @r"
    |Hostname/IP|Finding|Severity|
    |-|-|-|
    |[https://app.example.com](git-config.md)|git-config body|medium|
    |[10.0.0.5](http_tech_nginx_version.md)|http/tech:nginx version |info|
    |[https://other.example.com](git-config.md)|git-config body|medium|
    ");

    // Second git-config finding overwrote the first file
    let git_config = fs::read_to_string(out.join("git-config.md"))?;
    assert!(git_config.starts_with(
        "### Git Config File (git-config:body) found on https://other.example.com\n---\n"
    ));

    let nginx = fs::read_to_string(out.join("http_tech_nginx_version.md"))?;
    assert!(nginx.starts_with(
        "### Nginx Version (http/tech:nginx version:version) found on 10.0.0.5\n---\n"
    ));
    assert!(nginx.contains("**Extracted results**:\n\n- 1.18.0\n"));

    let mut entries: Vec<String> = fs::read_dir(&out)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    entries.sort();
    assert_eq!(
        entries,
        vec!["git-config.md", "http_tech_nginx_version.md", "index.md"]
    );

    Ok(())
}

#[tokio::test]
async fn test_finding_file_contents() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut exporter = exporter_in(temp_dir.path());
    let first_line = FINDINGS.lines().next().unwrap_or_default();

    export_from_reader(first_line.as_bytes(), &mut exporter, false).await?;

    let finding = fs::read_to_string(temp_dir.path().join("git-config.md"))?;
    let expected = concat!(
        "### Git Config File (git-config:body) found on https://app.example.com\n",
        "---\n",
        "**Details**: **git-config:body**  matched at https://app.example.com\n\n",
        "**Protocol**: HTTP\n\n",
        "**Full URL**: https://app.example.com/.git/config\n\n",
        "**Timestamp**: Mon Mar 4 05:06:07 +0000 UTC 2024\n\n",
        "**Template Information**\n\n",
        "| Key | Value |\n",
        "|---|---|\n",
        "| Name | Git Config File |\n",
        "| Authors | pdteam |\n",
        "| Tags | config, git, exposure |\n",
        "| Severity | medium |\n",
        "\nReferences: \n",
        "- https://example.org/git\n",
        "\n---\n",
        "Generated by mdreport",
    );
    assert_eq!(finding, expected);

    Ok(())
}

#[tokio::test]
async fn test_detailed_filenames_keep_findings_apart() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut options = MarkdownOptions::new(temp_dir.path().to_string_lossy());
    options.detailed_filenames = true;
    let mut exporter = MarkdownExporter::new(options)?;

    let input = concat!(
        r#"{"template-id":"exposed-panel","host":"a","matched-at":"https://a/login","matcher-name":"title"}"#,
        "\n",
        r#"{"template-id":"exposed-panel","host":"b","matched-at":"https://b/login","matcher-name":"title"}"#,
        "\n"
    );
    export_from_reader(input.as_bytes(), &mut exporter, false).await?;

    assert!(temp_dir.path().join("exposed-panel-https___a_login-title.md").is_file());
    assert!(temp_dir.path().join("exposed-panel-https___b_login-title.md").is_file());

    Ok(())
}

#[tokio::test]
async fn test_export_after_directory_removed() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let out = temp_dir.path().join("gone");
    let mut exporter = exporter_in(&out);
    fs::remove_dir_all(&out)?;

    let result = export_from_reader(FINDINGS.as_bytes(), &mut exporter, true).await;

    assert!(result.is_err());
    assert!(!out.exists());

    Ok(())
}
