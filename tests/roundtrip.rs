use flatini::SettingsStore;
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn roundtrip_saved_store_loads_identical_mapping() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.ini");

    let mut store = SettingsStore::new();
    store.put("name", "walk")?;
    store.put("version", "1.0")?;
    store.save_path(&path)?;

    let mut loaded = SettingsStore::new();
    loaded.load_path(&path)?;

    assert_eq!(loaded, store);
    assert_eq!(loaded.get("name"), Some("walk"));
    assert_eq!(loaded.get("version"), Some("1.0"));
    Ok(())
}

#[test]
fn value_containing_equals_roundtrips_verbatim() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.ini");

    // Only the first `=` on a line separates key from value.
    let mut store = SettingsStore::new();
    store.put("query", "a=b=c")?;
    store.save_path(&path)?;

    let mut loaded = SettingsStore::new();
    loaded.load_path(&path)?;
    assert_eq!(loaded.get("query"), Some("a=b=c"));
    Ok(())
}

#[test]
fn second_save_fully_overwrites_previous_content() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.ini");

    let mut store = SettingsStore::new();
    store.put("stale", "1")?;
    store.put("kept", "old")?;
    store.save_path(&path)?;

    let mut store = SettingsStore::new();
    store.put("kept", "new")?;
    store.save_path(&path)?;

    let mut loaded = SettingsStore::new();
    loaded.load_path(&path)?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get("kept"), Some("new"));
    assert_eq!(loaded.get("stale"), None);
    Ok(())
}

#[test]
fn empty_store_saves_an_empty_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.ini");

    SettingsStore::new().save_path(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, "");

    let mut loaded = SettingsStore::new();
    loaded.load_path(&path)?;
    assert!(loaded.is_empty());
    Ok(())
}

#[test]
fn save_creates_intermediate_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Acme").join("Walker").join("settings.ini");

    let mut store = SettingsStore::new();
    store.put("theme", "dark")?;
    store.save_path(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, "theme=dark\n");
    Ok(())
}

#[test]
fn save_preserves_insertion_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.ini");

    let mut store = SettingsStore::new();
    store.put("b", "2")?;
    store.put("a", "1")?;
    store.put("c", "3")?;
    store.save_path(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, "b=2\na=1\nc=3\n");
    Ok(())
}
