use super::*;

#[test]
fn test_writes_manifest_into_namespace_layout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    let path = fixture.write_manifest("accounts", "0001_users", "dependencies = []")?;

    assert!(path.is_file());
    assert!(fixture.file_exists("accounts/fixtures/0001_users.toml"));
    assert_eq!(
        fixture.read_file("accounts/fixtures/0001_users.toml")?,
        "dependencies = []"
    );
    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    fixture1.write_file("only-here.txt", "1")?;

    assert_ne!(fixture1.path(), fixture2.path());
    assert!(!fixture2.file_exists("only-here.txt"));
    Ok(())
}

#[test]
fn test_cleanup_on_drop() -> Result<(), Box<dyn std::error::Error>> {
    let path = {
        let fixture = TempDirFixture::new()?;
        fixture.create_dir("shop/fixtures")?;
        fixture.path().to_path_buf()
    };

    assert!(!path.exists());
    Ok(())
}
