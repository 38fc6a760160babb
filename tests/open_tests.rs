//! Open Pipeline Tests
//!
//! Writes textures and atlas documents to a temporary directory and runs
//! them through `open` and `TexTool`.

use klei_tex::{
    AtlasRect, DecodeListener, DecodedImage, OpenOptions, TexError, TexTool, TextureInfo,
    WriterSink, open, open_path,
};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Container with one ARGB mip, rows given bottom row first
fn argb_texture(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    let mut data = b"KTEX".to_vec();
    for value in [12u32, 3, 1, 2, width, height, (pixels.len() * 4) as u32] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    for [r, g, b, a] in pixels {
        data.extend_from_slice(&[*a, *r, *g, *b]);
    }
    data
}

/// 2x2 texture: bottom row red, green; top row blue, white
fn quad_texture() -> Vec<u8> {
    argb_texture(2, 2, &[RED, GREEN, BLUE, WHITE])
}

const QUAD_ATLAS: &str = r#"<Atlas>
    <Texture filename="hud.tex" />
    <Elements>
        <Element name="b" u1="0.5" u2="1.0" v1="0.0" v2="0.5" />
        <Element name="c" u1="oops" u2="1.0" v1="0.0" v2="0.5" />
        <Element name="a" u1="0.0" u2="0.5" v1="0.5" v2="1.0" />
    </Elements>
</Atlas>"#;

fn write_files(dir: &TempDir, texture: &[u8], atlas: Option<&str>) -> PathBuf {
    let path = dir.path().join("hud.tex");
    fs::write(&path, texture).unwrap();
    if let Some(xml) = atlas {
        fs::write(dir.path().join("hud.xml"), xml).unwrap();
    }
    path
}

#[derive(Default)]
struct Recorder {
    events: Vec<&'static str>,
    progress: Vec<u8>,
    opened: Option<TextureInfo>,
    decoded_rects: usize,
}

impl DecodeListener for Recorder {
    fn on_opened(&mut self, info: &TextureInfo) {
        self.events.push("opened");
        self.opened = Some(info.clone());
    }

    fn on_progress(&mut self, percent: u8) {
        if self.events.last() != Some(&"progress") {
            self.events.push("progress");
        }
        self.progress.push(percent);
    }

    fn on_decoded(&mut self, _image: &DecodedImage, rects: &[AtlasRect]) {
        self.events.push("decoded");
        self.decoded_rects = rects.len();
    }
}

#[test]
fn test_open_with_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_files(&dir, &quad_texture(), Some(QUAD_ATLAS));

    let mut recorder = Recorder::default();
    let output = open_path(&path, &OpenOptions::default(), &mut recorder).unwrap();

    assert_eq!(recorder.events, vec!["opened", "progress", "decoded"]);
    assert_eq!(recorder.progress, vec![50, 100]);
    assert_eq!(recorder.decoded_rects, 2);

    let info = recorder.opened.unwrap();
    assert_eq!(info, output.info);
    assert_eq!(info.file_name, "hud.tex");
    assert_eq!(info.platform, "PC");
    assert_eq!(info.format, "ARGB");
    assert_eq!(info.texture_type, "2D");
    assert_eq!(info.mip_count, 1);
    assert_eq!(info.size, "2x2");
    assert!(!info.legacy);

    // Rows come out top to bottom
    assert_eq!(output.image.pixel(0, 0), Some(BLUE));
    assert_eq!(output.image.pixel(1, 0), Some(WHITE));
    assert_eq!(output.image.pixel(0, 1), Some(RED));
    assert_eq!(output.image.pixel(1, 1), Some(GREEN));

    let names: Vec<_> = output.rects.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);

    // "a" covers the upper-left pixel of the flipped image
    let a = output.rects[0].pixel_bounds(2, 2).unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (0, 0, 1, 1));
    let b = output.rects[1].pixel_bounds(2, 2).unwrap();
    assert_eq!((b.x, b.y, b.width, b.height), (1, 1, 1, 1));
    assert_eq!(output.image.pixel(b.x, b.y), Some(GREEN));
}

#[test]
fn test_open_without_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_files(&dir, &quad_texture(), None);

    let output = open_path(&path, &OpenOptions::default(), &mut ()).unwrap();
    assert!(output.rects.is_empty());
    assert_eq!(output.image.dimensions(), (2, 2));
}

#[test]
fn test_unreadable_atlas_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_files(&dir, &quad_texture(), Some("<Atlas><Elements>"));

    let output = open_path(&path, &OpenOptions::default(), &mut ()).unwrap();
    assert!(output.rects.is_empty());
}

#[test]
fn test_atlas_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_files(&dir, &quad_texture(), Some(QUAD_ATLAS));

    let disabled = OpenOptions::new().with_load_atlas(false);
    let output = open_path(&path, &disabled, &mut ()).unwrap();
    assert!(output.rects.is_empty());

    fs::rename(dir.path().join("hud.xml"), dir.path().join("hud.atlas")).unwrap();
    let renamed = OpenOptions::new().with_atlas_extension("atlas");
    let output = open_path(&path, &renamed, &mut ()).unwrap();
    assert_eq!(output.rects.len(), 2);
}

#[test]
fn test_open_from_stream() {
    let mut recorder = Recorder::default();
    let output = open(
        Path::new("memory/only.tex"),
        Cursor::new(quad_texture()),
        &OpenOptions::default(),
        &mut recorder,
    )
    .unwrap();

    assert_eq!(output.info.file_name, "only.tex");
    assert!(output.rects.is_empty());
    assert_eq!(recorder.progress.last(), Some(&100));
}

#[test]
fn test_dimension_limit() {
    let options = OpenOptions::new().with_max_dimension(1);
    let mut recorder = Recorder::default();
    let err = open(
        Path::new("big.tex"),
        Cursor::new(quad_texture()),
        &options,
        &mut recorder,
    )
    .unwrap_err();

    assert!(matches!(err, TexError::MalformedContainer { .. }));
    assert!(recorder.events.is_empty());
}

#[test]
fn test_unsupported_format_after_open() {
    let mut data = quad_texture();
    // pixel format field follows magic and platform
    data[8..12].copy_from_slice(&99u32.to_le_bytes());

    let mut recorder = Recorder::default();
    let err = open(
        Path::new("odd.tex"),
        Cursor::new(data),
        &OpenOptions::default(),
        &mut recorder,
    )
    .unwrap_err();

    assert!(matches!(err, TexError::UnsupportedFormat { value: 99 }));
    assert_eq!(recorder.events, vec!["opened"]);
    assert!(recorder.progress.is_empty());
}

#[test]
fn test_tool_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_files(&dir, &quad_texture(), Some(QUAD_ATLAS));

    let mut tool = TexTool::default();
    assert!(tool.current().is_none());
    assert!(matches!(
        tool.save(&mut WriterSink::png(Cursor::new(Vec::new()))),
        Err(TexError::Export(_))
    ));

    let current = tool.open_file(&path, &mut ()).unwrap();
    assert_eq!(current.path, path);
    assert_eq!(current.output.rects.len(), 2);

    let png = dir.path().join("hud.png");
    tool.save_to_path(&png).unwrap();
    let saved = image::open(&png).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (2, 2));
    assert_eq!(saved.get_pixel(0, 0).0, BLUE);
    assert_eq!(saved.get_pixel(1, 1).0, GREEN);

    // A failed open leaves nothing behind
    let truncated = &quad_texture()[..30];
    assert!(
        tool.open(Path::new("broken.tex"), Cursor::new(truncated), &mut ())
            .is_err()
    );
    assert!(tool.current().is_none());

    assert!(tool.open_file(dir.path().join("missing.tex"), &mut ()).is_err());
    assert!(tool.current().is_none());
}

#[test]
fn test_info_serializes() {
    let output = open(
        Path::new("hud.tex"),
        Cursor::new(quad_texture()),
        &OpenOptions::default(),
        &mut (),
    )
    .unwrap();

    let json = serde_json::to_value(&output.info).unwrap();
    assert_eq!(json["size"], "2x2");
    assert_eq!(json["texture_type"], "2D");
    assert_eq!(json["legacy"], false);
}
