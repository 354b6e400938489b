//! SVG to PNG conversion.

use std::fs;
use std::path::{Path, PathBuf};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

/// Icon sizes produced from `logo{size}.svg`.
pub const LOGO_SIZES: [u32; 2] = [192, 512];

/// Errors that can occur while converting a logo.
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid SVG in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Cannot allocate a {0}x{0} canvas")]
    Canvas(u32),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One conversion: `input` rendered to a `size`×`size` PNG at `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub size: u32,
}

/// The fixed logo set inside `images_dir`.
pub fn logo_jobs(images_dir: &Path) -> Vec<LogoJob> {
    LOGO_SIZES
        .iter()
        .map(|&size| LogoJob {
            input: images_dir.join(format!("logo{size}.svg")),
            output: images_dir.join(format!("logo{size}.png")),
            size,
        })
        .collect()
}

/// Render SVG source onto a `size`×`size` pixmap.
///
/// The drawing is scaled to cover the square: aspect ratio kept, centered,
/// overflow cropped.
pub fn rasterize(svg: &[u8], size: u32) -> Result<Pixmap, String> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).map_err(|e| e.to_string())?;

    let mut pixmap = Pixmap::new(size, size).ok_or_else(|| "zero-sized canvas".to_string())?;

    let svg_size = tree.size();
    let target = size as f32;
    let scale = (target / svg_size.width()).max(target / svg_size.height());
    let dx = (target - svg_size.width() * scale) / 2.0;
    let dy = (target - svg_size.height() * scale) / 2.0;
    let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);

    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Convert one SVG file to a square PNG.
pub fn convert_svg_to_png(input: &Path, output: &Path, size: u32) -> Result<(), LogoError> {
    let svg = fs::read(input).map_err(|source| LogoError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    if size == 0 {
        return Err(LogoError::Canvas(size));
    }

    let pixmap = rasterize(&svg, size).map_err(|message| LogoError::Parse {
        path: input.to_path_buf(),
        message,
    })?;

    let png = pixmap
        .encode_png()
        .map_err(|e| LogoError::Encode(e.to_string()))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| LogoError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(output, png).map_err(|source| LogoError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} ({size}x{size})", output.display());
    Ok(())
}

/// Convert the whole logo set in `images_dir`, stopping at the first failure.
pub fn convert_logos(images_dir: &Path) -> Result<Vec<PathBuf>, LogoError> {
    let mut written = Vec::new();
    for job in logo_jobs(images_dir) {
        convert_svg_to_png(&job.input, &job.output, job.size)?;
        written.push(job.output);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
  <rect width="64" height="64" fill="#FF6B6B"/>
  <circle cx="32" cy="32" r="20" fill="#4ECDC4"/>
</svg>"##;

    const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="100">
  <rect width="300" height="100" fill="#45B7D1"/>
</svg>"##;

    fn dimensions(path: &Path) -> (u32, u32) {
        let pixmap = Pixmap::load_png(path).unwrap();
        (pixmap.width(), pixmap.height())
    }

    #[test]
    fn produces_exact_sizes() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("logo.svg");
        fs::write(&input, SQUARE_SVG).unwrap();

        for size in LOGO_SIZES {
            let output = temp.path().join(format!("logo{size}.png"));
            convert_svg_to_png(&input, &output, size).unwrap();
            assert_eq!(dimensions(&output), (size, size));
        }
    }

    #[test]
    fn wide_input_still_fills_square() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("wide.svg");
        let output = temp.path().join("wide.png");
        fs::write(&input, WIDE_SVG).unwrap();

        convert_svg_to_png(&input, &output, 192).unwrap();

        let pixmap = Pixmap::load_png(&output).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (192, 192));
        // Cover fit: the corners are painted, not transparent padding
        assert!(pixmap.pixel(0, 0).unwrap().alpha() > 0);
        assert!(pixmap.pixel(191, 191).unwrap().alpha() > 0);
    }

    #[test]
    fn converts_the_logo_set() {
        let temp = tempdir().unwrap();
        for size in LOGO_SIZES {
            fs::write(temp.path().join(format!("logo{size}.svg")), SQUARE_SVG).unwrap();
        }

        let written = convert_logos(temp.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(dimensions(&temp.path().join("logo192.png")), (192, 192));
        assert_eq!(dimensions(&temp.path().join("logo512.png")), (512, 512));
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let temp = tempdir().unwrap();
        let result = convert_logos(temp.path());
        assert!(matches!(result, Err(LogoError::Read { .. })));
    }

    #[test]
    fn malformed_svg_is_a_parse_error() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("broken.svg");
        fs::write(&input, "<svg><rect").unwrap();

        let result = convert_svg_to_png(&input, &temp.path().join("out.png"), 192);

        assert!(matches!(result, Err(LogoError::Parse { .. })));
    }

    #[test]
    fn job_paths_follow_size() {
        let jobs = logo_jobs(Path::new("public/images"));
        assert_eq!(jobs[0].input, PathBuf::from("public/images/logo192.svg"));
        assert_eq!(jobs[1].output, PathBuf::from("public/images/logo512.png"));
    }
}
