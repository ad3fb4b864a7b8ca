//! End-to-end runs of both bakers through files on disk.

use asset::{
    HeaderSymbols, MeshData, Rgb565Texture, load_obj_from_path, render_mesh_header,
    render_texture_header,
};
use corelib::BakeError;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::tempdir;

const QUAD_OBJ: &str = "\
# single quad
o Quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.5 0.5
vn 0.0 0.0 1.0
s off
f 1/1/1 2/1/1 3/1/1 4/1/1
";

#[test]
fn quad_obj_to_header() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Quad.obj");
    std::fs::write(&path, QUAD_OBJ).expect("Failed to write OBJ");

    let obj = load_obj_from_path(&path).expect("parse");
    assert_eq!(obj.positions.len(), 4);
    assert_eq!(obj.texcoords.len(), 1);
    assert_eq!(obj.faces.len(), 1);

    let mesh = MeshData::from_obj(&obj).expect("build");
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);

    let text = String::from_utf8(
        render_mesh_header(&mesh, &HeaderSymbols::new("Quad.obj", "quad")).unwrap(),
    )
    .unwrap();
    assert!(text.starts_with("#pragma once\n// Auto-generated from Quad.obj\n"));
    assert!(text.contains("struct QuadVertex { float x, y, z, u, v; };"));
    assert!(text.contains("  {-1.00000f, -1.00000f, 0.00000f, 0.50000f, 0.50000f},\n"));
    assert!(text.contains("static const uint16_t quad_indices[6] = {\n  0, 1, 2, 0, 2, 3\n};"));
    assert!(text.ends_with("static const int quad_vert_count = 4;\nstatic const int quad_tri_count  = 2;\n"));
}

#[test]
fn mesh_output_is_deterministic() {
    let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0.5 0.5 1\nvt 0 0\nvt 1 0\nvt 1 1\n\
               f 1/1 2/2 3/3 4/2\nf 1/1 2/2 5/3\nf 2/2 3/3 5/3\nf 3/3 4/2 5/3\n";
    let render = || {
        let obj = asset::obj::load_obj_from_str(src).unwrap();
        let mesh = MeshData::from_obj(&obj).unwrap();
        render_mesh_header(&mesh, &HeaderSymbols::new("pyramid.obj", "pyramid")).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn missing_obj_file_reports_path() {
    let dir = tempdir().unwrap();
    let err = load_obj_from_path(dir.path().join("nope.obj")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.obj"));
}

#[test]
fn red_png_to_header() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("red.png");
    RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]))
        .save(&path)
        .expect("Failed to write PNG");

    let tex = Rgb565Texture::load(&path, 2, 2).expect("load");
    assert_eq!(tex.pixels, vec![0xF800; 4]);

    let text = String::from_utf8(
        render_texture_header(&tex, &HeaderSymbols::new("red.png", "red")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        text,
        "#pragma once\n// red.png converted to RGB565, 2x2\n#define RED_TEX_W 2\n\
         #define RED_TEX_H 2\n\nstatic const uint16_t red_texture[4] PROGMEM = {\n\
         0xF800, 0xF800, 0xF800, 0xF800\n};\n"
    );
}

#[test]
fn alpha_channel_is_discarded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ghost.png");
    RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 0]))
        .save(&path)
        .unwrap();

    let tex = Rgb565Texture::load(&path, 2, 2).unwrap();
    assert_eq!(tex.pixels, vec![0x001F; 4]);
}

#[test]
fn default_size_texture() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grad.png");
    RgbImage::from_fn(64, 32, |x, y| Rgb([(x * 4) as u8, (y * 8) as u8, 0]))
        .save(&path)
        .unwrap();

    let tex = Rgb565Texture::load(
        &path,
        asset::texture::DEFAULT_WIDTH,
        asset::texture::DEFAULT_HEIGHT,
    )
    .unwrap();
    assert!(tex.is_valid());
    assert_eq!(tex.pixels.len(), 128 * 128);
}

#[test]
fn unrecognised_image_is_a_capability_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();

    let err = Rgb565Texture::load(&path, 4, 4).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BakeError>(),
        Some(BakeError::UnsupportedImageFormat { .. })
    ));
}

#[cfg(not(feature = "bmp"))]
#[test]
fn disabled_decoder_names_feature() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tile.bmp");
    std::fs::write(&path, b"BM\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();

    let err = Rgb565Texture::load(&path, 4, 4).unwrap_err();
    match err.downcast_ref::<BakeError>() {
        Some(BakeError::UnsupportedImageFormat { hint, .. }) => {
            assert!(hint.contains("--features asset/bmp"), "hint: {hint}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn checked_reader_decodes_without_reopening() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pixel.png");
    RgbImage::from_pixel(3, 2, Rgb([0, 255, 0])).save(&path).unwrap();

    let reader = asset::texture::check_decoder(&path).expect("png decoder enabled");
    assert_eq!(reader.format(), Some(image::ImageFormat::Png));
    let img = reader.decode().expect("decode").to_rgb8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1), &Rgb([0, 255, 0]));
}
