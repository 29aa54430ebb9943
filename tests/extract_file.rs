use std::fs;
use std::path::Path;

use mda::codec::ALPHABET;
use mda::{extract_chunk_to_file, ExtractConfig, MdaError};

fn encode(bytes: &[u8]) -> String {
    let mut out = String::new();
    for triple in bytes.chunks(3) {
        let mut value = 0u32;
        for i in 0..3 {
            value = value << 8 | *triple.get(i).unwrap_or(&0) as u32;
        }
        for shift in [18, 12, 6, 0] {
            out.push(ALPHABET[((value >> shift) & 0x3F) as usize] as char);
        }
    }
    out
}

fn write_container(dir: &Path) -> String {
    let mesh: Vec<u8> = (0..=255u8).collect();
    let text = b"hello, chunk";
    // 256 % 3 == 1, so the encoder prepends two padding bytes
    let mut padded_mesh = vec![0u8; 2];
    padded_mesh.extend(&mesh);
    let encoded_mesh = encode(&padded_mesh);

    let mut container = String::from("# test container\n");
    container.push_str(&format!("$MESH {:08X} {:08X}\n", mesh.len(), mesh.len()));
    for line in encoded_mesh.as_bytes().chunks(64) {
        container.push_str(&format!("&{}\r\n", std::str::from_utf8(line).unwrap()));
    }
    container.push_str(&format!("$TEXT {:08X} {:08X}\n&{}\n", text.len(), text.len(), encode(text)));

    let path = dir.join("model.mda");
    fs::write(&path, container).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_extract_chunk_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_container(dir.path());
    let output = dir.path().join("model.mesh");

    let config = ExtractConfig::new(input, "MESH".to_string(), output.to_string_lossy().into_owned());
    let written = extract_chunk_to_file(&config).unwrap();

    let expected: Vec<u8> = (0..=255u8).collect();
    assert_eq!(written, expected.len());
    assert_eq!(fs::read(&output).unwrap(), expected);
}

#[test]
fn test_extract_second_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_container(dir.path());
    let output = dir.path().join("hello.txt");

    let config = ExtractConfig::new(input, "TEXT".to_string(), output.to_string_lossy().into_owned());
    extract_chunk_to_file(&config).unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"hello, chunk");
}

#[test]
fn test_missing_chunk_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_container(dir.path());
    let output = dir.path().join("skin.bin");

    let config = ExtractConfig::new(input, "SKIN".to_string(), output.to_string_lossy().into_owned());
    let err = extract_chunk_to_file(&config).unwrap_err();
    assert!(err.is_chunk_not_found());
    assert!(!output.exists());
    // Only the container itself is left in the directory
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_truncated_chunk_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.mda");
    fs::write(&input, format!("$TEXT 00000006 00000006\n&{}\n", encode(b"abc"))).unwrap();
    let output = dir.path().join("out.bin");
    fs::write(&output, b"previous").unwrap();

    let config = ExtractConfig::new(
        input.to_string_lossy().into_owned(),
        "TEXT".to_string(),
        output.to_string_lossy().into_owned(),
    );
    let err = extract_chunk_to_file(&config).unwrap_err();
    assert!(matches!(err, MdaError::TruncatedData { remaining: 3, .. }));
    assert_eq!(fs::read(&output).unwrap(), b"previous");
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExtractConfig::new(
        dir.path().join("absent.mda").to_string_lossy().into_owned(),
        "TEXT".to_string(),
        dir.path().join("out.bin").to_string_lossy().into_owned(),
    );
    assert!(matches!(extract_chunk_to_file(&config), Err(MdaError::Io { .. })));
}

#[test]
fn test_write_atomically_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.bin");
    fs::write(&output, b"old contents that are longer").unwrap();

    mda::utils::write_atomically(&output, b"new").unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"new");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
