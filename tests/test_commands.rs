mod helpers;

use anyhow::Result;
use helpers::sample_notes;
use notegrid::application::NoteStore;
use notegrid::cli::args::Command;
use notegrid::execute;
use notegrid::util::testing::{GatewayCall, MockBlobStore, MockNoteGateway};

fn backend() -> (MockNoteGateway, MockBlobStore) {
    let gateway = MockNoteGateway::builder()
        .with_record(sample_notes::groceries())
        .with_record(sample_notes::todo())
        .build();
    let blobs = MockBlobStore::builder()
        .with_url("img1.png", "https://cdn/img1.png")
        .build();
    (gateway, blobs)
}

#[tokio::test]
async fn given_notes_when_listing_then_prints_one_line_per_note() -> Result<()> {
    // Arrange
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway, blobs);
    let mut out = Vec::new();

    // Act
    execute(&mut store, Command::List { json: false }, &mut out).await?;

    // Assert
    let printed = String::from_utf8(out)?;
    assert_eq!(
        printed,
        "1\tGroceries\tMilk\thttps://cdn/img1.png\n2\tTodo\tCall the plumber\t-\n"
    );
    Ok(())
}

#[tokio::test]
async fn given_notes_when_listing_as_json_then_prints_array() -> Result<()> {
    // Arrange
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway, blobs);
    let mut out = Vec::new();

    // Act
    execute(&mut store, Command::List { json: true }, &mut out).await?;

    // Assert
    let parsed: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[0]["image"], "https://cdn/img1.png");
    Ok(())
}

#[tokio::test]
async fn given_name_and_description_when_creating_then_prints_new_id() -> Result<()> {
    // Arrange
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway.clone(), blobs);
    let mut out = Vec::new();
    let command = Command::Create {
        name: "A".to_string(),
        description: "B".to_string(),
        image: None,
    };

    // Act
    execute(&mut store, command, &mut out).await?;

    // Assert
    assert_eq!(String::from_utf8(out)?, "Created note created-1\n");
    assert_eq!(store.notes().len(), 3);
    assert!(store.draft().name.is_empty());
    assert_eq!(gateway.records().len(), 3);
    Ok(())
}

#[tokio::test]
async fn given_image_path_when_creating_then_uploads_before_submitting() -> Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let image = dir.path().join("cat.png");
    std::fs::write(&image, [1, 2, 3])?;
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway.clone(), blobs.clone());
    let mut out = Vec::new();
    let command = Command::Create {
        name: "Cat".to_string(),
        description: "Meow".to_string(),
        image: Some(image),
    };

    // Act
    execute(&mut store, command, &mut out).await?;

    // Assert
    assert_eq!(blobs.stored("cat.png"), Some(vec![1, 2, 3]));
    let persisted = gateway.records().pop().expect("Record should exist");
    assert_eq!(persisted.image.as_deref(), Some("cat.png"));
    Ok(())
}

#[tokio::test]
async fn given_empty_name_when_creating_then_fails_without_create_call() {
    // Arrange
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway.clone(), blobs);
    let mut out = Vec::new();
    let command = Command::Create {
        name: String::new(),
        description: "B".to_string(),
        image: None,
    };

    // Act
    let result = execute(&mut store, command, &mut out).await;

    // Assert
    assert!(result.is_err());
    assert!(out.is_empty());
    assert!(gateway
        .calls()
        .iter()
        .all(|call| !matches!(call, GatewayCall::Create(_))));
}

#[tokio::test]
async fn given_rejected_delete_when_deleting_then_reports_error() {
    // Arrange
    let gateway = MockNoteGateway::builder()
        .with_record(sample_notes::todo())
        .with_delete_failure("2")
        .build();
    let blobs = MockBlobStore::builder().build();
    let mut store = NoteStore::new(gateway, blobs);
    let mut out = Vec::new();

    // Act
    let result = execute(
        &mut store,
        Command::Delete {
            note_id: "2".to_string(),
        },
        &mut out,
    )
    .await;

    // Assert
    let error = result.expect_err("Delete should fail");
    assert!(format!("{error:#}").contains("did not confirm"));
    assert_eq!(store.flagged().len(), 1);
}

#[tokio::test]
async fn given_output_path_when_viewing_then_writes_board_file() -> Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("board.html");
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway, blobs);
    let mut out = Vec::new();

    // Act
    execute(
        &mut store,
        Command::View {
            output: Some(target.clone()),
        },
        &mut out,
    )
    .await?;

    // Assert
    let html = std::fs::read_to_string(&target)?;
    assert!(html.contains("Groceries"));
    assert!(String::from_utf8(out)?.starts_with("Board written to"));
    Ok(())
}

#[tokio::test]
async fn given_upload_command_when_executing_then_prints_key() -> Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let image = dir.path().join("dog.jpg");
    std::fs::write(&image, [4])?;
    let (gateway, blobs) = backend();
    let mut store = NoteStore::new(gateway, blobs);
    let mut out = Vec::new();

    // Act
    execute(&mut store, Command::Upload { path: image }, &mut out).await?;

    // Assert
    assert_eq!(String::from_utf8(out)?, "dog.jpg\n");
    assert_eq!(store.draft().image.as_deref(), Some("dog.jpg"));
    Ok(())
}
