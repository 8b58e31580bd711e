//! Integration tests for manifest-driven merging
//!
//! These tests write chunk files and a manifest to disk, run the full
//! manifest → chunk stream → merge → FASTA pipeline, and read the result back.

use flate2::write::GzEncoder;
use flate2::Compression;
use seqstitch::{merge_manifest, DataSink, FastaStream, MergeConfig, StitchError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write chunk files plus a manifest listing them in the given order
fn write_chunks(dir: &TempDir, chunks: &[(&str, u64, &str)]) -> PathBuf {
    let manifest_path = dir.path().join("chunks.txt");
    let mut manifest = std::fs::File::create(&manifest_path).unwrap();

    for (i, (name, offset, seq)) in chunks.iter().enumerate() {
        let path = dir.path().join(format!("chunk_{}.fa", i));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, ">{}|1|{}", name, offset).unwrap();
        // Wrap input at 7 to make sure input wrapping is irrelevant
        for line in seq.as_bytes().chunks(7) {
            file.write_all(line).unwrap();
            file.write_all(b"\n").unwrap();
        }
        writeln!(manifest, "{}", path.display()).unwrap();
    }

    manifest_path
}

fn read_output(path: &Path) -> Vec<(String, String)> {
    FastaStream::from_path(path)
        .unwrap()
        .map(|r| {
            let r = r.unwrap();
            (r.header, String::from_utf8(r.sequence).unwrap())
        })
        .collect()
}

#[test]
fn test_pipeline_overlap_merge() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(
        &dir,
        &[("seqA", 0, "ACGTACGTAC"), ("seqA", 8, "acGTNN")],
    );
    let output = dir.path().join("merged.fa");

    let summary = merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default()).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), ">seqA\nACGTACGTacGTNN\n");
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.records, 1);
    assert_eq!(summary.bases, 14);
    assert_eq!(summary.overlap_bases, 2);
}

#[test]
fn test_pipeline_multiple_sequences_first_seen_order() {
    let dir = TempDir::new().unwrap();
    let chr2: String = "ACGTTGCA".repeat(30); // 240 bp
    let chr1: String = "GATTACA".repeat(20); // 140 bp
    let manifest = write_chunks(
        &dir,
        &[
            ("chr2", 0, &chr2[..100]),
            ("chr2", 90, &chr2[90..200]),
            ("chr2", 180, &chr2[180..]),
            ("chr1", 0, &chr1[..80]),
            ("chr1", 80, &chr1[80..]),
        ],
    );
    let output = dir.path().join("merged.fa");

    merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default()).unwrap();

    let records = read_output(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], ("chr2".to_string(), chr2.clone()));
    assert_eq!(records[1], ("chr1".to_string(), chr1.clone()));

    // Every sequence line but the last of each record is exactly 80 bases
    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], ">chr2");
    assert_eq!(lines[1].len(), 80);
    assert_eq!(lines[2].len(), 80);
    assert_eq!(lines[3].len(), 80);
    assert_eq!(lines[4], ">chr1");
    assert_eq!(lines[5].len(), 80);
    assert_eq!(lines[6].len(), 60);
}

#[test]
fn test_pipeline_soft_mask_union() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(
        &dir,
        &[
            ("chrM", 0, "ACGTacgtACGT"),
            ("chrM", 6, "GTACgtACGTAA"),
        ],
    );
    let output = dir.path().join("merged.fa");

    let summary = merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default()).unwrap();

    let records = read_output(&output);
    assert_eq!(records[0].1, "ACGTacgtACgtACGTAA");
    assert_eq!(summary.overlap_bases, 6);
    assert_eq!(summary.masked_by_merge, 2);
}

#[test]
fn test_pipeline_gzip_input_and_output() {
    let dir = TempDir::new().unwrap();
    let chunk_path = dir.path().join("chunk_0.fa.gz");
    {
        let file = std::fs::File::create(&chunk_path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b">plasmid|1|0\nACGTACGTAC\n").unwrap();
        encoder.finish().unwrap();
    }
    let manifest = dir.path().join("chunks.txt");
    std::fs::write(&manifest, format!("{}\n", chunk_path.display())).unwrap();
    let output = dir.path().join("merged.fa.gz");

    merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default()).unwrap();

    let records = read_output(&output);
    assert_eq!(records, vec![("plasmid".to_string(), "ACGTACGTAC".to_string())]);
}

#[test]
fn test_pipeline_custom_line_width() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(&dir, &[("s", 0, "ACGTACGTA"), ("s", 9, "CGT")]);
    let output = dir.path().join("merged.fa");

    let config = MergeConfig::default().with_line_width(5);
    merge_manifest(&manifest, DataSink::from_path(&output), config).unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), ">s\nACGTA\nCGTAC\nGT\n");
}

#[test]
fn test_pipeline_errors_carry_chunk_path() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(&dir, &[("seqA", 0, "ACGTACGTAC"), ("seqA", 12, "ACGT")]);
    let output = dir.path().join("merged.fa");

    let result = merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default());
    match result {
        Err(StitchError::ChunkGap { name, path, .. }) => {
            assert_eq!(name, "seqA");
            assert_eq!(path, dir.path().join("chunk_1.fa"));
        }
        other => panic!("Expected ChunkGap, got {:?}", other),
    }
}

#[test]
fn test_pipeline_first_chunk_offset() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(&dir, &[("seqA", 3, "ACGT")]);
    let output = dir.path().join("merged.fa");

    let result = merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default());
    assert!(matches!(result, Err(StitchError::InvalidFirstChunk { offset: 3, .. })));
}

#[test]
fn test_pipeline_overlap_mismatch() {
    let dir = TempDir::new().unwrap();
    let manifest = write_chunks(&dir, &[("seqA", 0, "ACGTA"), ("seqA", 4, "TTT")]);
    let output = dir.path().join("merged.fa");

    let result = merge_manifest(&manifest, DataSink::from_path(&output), MergeConfig::default());
    assert!(matches!(
        result,
        Err(StitchError::OverlapMismatch { position: 4, .. })
    ));
}

#[test]
fn test_pipeline_malformed_header() {
    let dir = TempDir::new().unwrap();
    let chunk = dir.path().join("chunk.fa");
    std::fs::write(&chunk, ">seqA|1|abc\nACGT\n").unwrap();
    let manifest = dir.path().join("chunks.txt");
    std::fs::write(&manifest, format!("{}\n", chunk.display())).unwrap();

    let result = merge_manifest(
        &manifest,
        DataSink::from_path(dir.path().join("merged.fa")),
        MergeConfig::default(),
    );
    assert!(matches!(result, Err(StitchError::MalformedHeader { .. })));
}

#[test]
fn test_pipeline_missing_manifest() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("merged.fa");

    let result = merge_manifest(
        dir.path().join("missing.txt"),
        DataSink::from_path(&output),
        MergeConfig::default(),
    );
    assert!(matches!(result, Err(StitchError::FileOpen { .. })));
    // The output is not created when the manifest cannot be read
    assert!(!output.exists());
}

fn merge_single_file(dir: &TempDir, name: &str, contents: &[u8]) -> (PathBuf, StitchError) {
    let chunk = dir.path().join(name);
    std::fs::write(&chunk, contents).unwrap();
    let manifest = dir.path().join("chunks.txt");
    std::fs::write(&manifest, format!("{}\n", chunk.display())).unwrap();

    let err = merge_manifest(
        &manifest,
        DataSink::from_path(dir.path().join("merged.fa")),
        MergeConfig::default(),
    )
    .unwrap_err();
    (chunk, err)
}

#[test]
fn test_pipeline_non_utf8_chunk_names_file() {
    let dir = TempDir::new().unwrap();
    let (chunk, err) = merge_single_file(&dir, "bad_chunk.fa", b">seqA|1|0\nAC\xffGT\n");

    assert!(matches!(err, StitchError::Read { line: 1, .. }), "{:?}", err);
    assert!(err.to_string().contains(&chunk.display().to_string()), "{}", err);
}

#[test]
fn test_pipeline_truncated_gzip_chunk_names_file() {
    let dir = TempDir::new().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b">seqA|1|0\n").unwrap();
    encoder.write_all(&b"ACGT".repeat(500)).unwrap();
    let compressed = encoder.finish().unwrap();
    let truncated = &compressed[..compressed.len() / 2];

    let (chunk, err) = merge_single_file(&dir, "chunk_0.fa.gz", truncated);

    assert!(matches!(err, StitchError::Read { .. }), "{:?}", err);
    assert!(err.to_string().contains(&chunk.display().to_string()), "{}", err);
}
