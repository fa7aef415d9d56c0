use image::Rgba;
use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use crate::rle::Rle;
use crate::rle::RleError;
use crate::rle::Token;

/// Dead cells, and everything the pattern never touches.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Live cells.
pub const FOREGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Rle(#[from] RleError),

    #[error("Run of {run} cells at ({x}, {y}) escapes the {width}x{height} grid")]
    RunOutOfBounds {
        x: u32,
        y: u32,
        run: u32,
        width: u32,
        height: u32,
    },
}

/// Pulls tokens out of `rle` until the terminator and paints them into a
/// fresh canvas of the declared dimensions, one pixel per cell.
///
/// A run that starts at or extends past the declared grid is rejected: the
/// header is the encoder's own promise about the pattern's extent, so
/// overflow means the file is corrupt. Trailing row breaks past the last row
/// are harmless since they paint nothing.
pub fn rasterize(rle: &mut Rle) -> Result<RgbaImage, RasterError> {
    let (width, height) = (rle.width, rle.height);
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    let (mut x, mut y) = (0u32, 0u32);

    loop {
        match rle.next_token()? {
            Token::Dead(run) => {
                check_run(x, y, run, width, height)?;

                x += run;
            }

            Token::Alive(run) => {
                check_run(x, y, run, width, height)?;

                for i in 0..run {
                    canvas.put_pixel(x + i, y, FOREGROUND);
                }

                x += run;
            }

            Token::RowEnd => {
                x = 0;
                y += 1;
            }

            Token::End => break,
        }
    }

    debug!(width, height, "rasterized pattern");

    Ok(canvas)
}

fn check_run(x: u32, y: u32, run: u32, width: u32, height: u32) -> Result<(), RasterError> {
    let overflows_row = x.checked_add(run).map_or(true, |end| end > width);

    if y >= height || overflows_row {
        return Err(RasterError::RunOutOfBounds {
            x,
            y,
            run,
            width,
            height,
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use image::RgbaImage;

    use super::rasterize;
    use super::RasterError;
    use super::BACKGROUND;
    use super::FOREGROUND;
    use crate::rle::Rle;

    fn raster(lines: &[&str]) -> RgbaImage {
        rasterize(&mut Rle::parse(lines).unwrap()).unwrap()
    }

    fn alive(canvas: &RgbaImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|&(_, _, &px)| px == FOREGROUND)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn cursor_algebra() {
        let canvas = raster(&["x = 9, y = 2", "3o2b4o$2o!"]);

        assert_eq!(canvas.dimensions(), (9, 2));
        assert_eq!(
            alive(&canvas),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (5, 0),
                (6, 0),
                (7, 0),
                (8, 0),
                (0, 1),
                (1, 1),
            ]
        );

        // The dead gap stays background.
        assert_eq!(*canvas.get_pixel(3, 0), BACKGROUND);
        assert_eq!(*canvas.get_pixel(4, 0), BACKGROUND);
    }

    #[test]
    fn glider() {
        let canvas = raster(&["x = 3, y = 3", "bob$2bo$3o!"]);

        assert_eq!(
            alive(&canvas),
            vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn short_rows_stay_background() {
        let canvas = raster(&["x = 3, y = 2", "o$o!"]);

        assert_eq!(alive(&canvas), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn trailing_row_breaks_are_harmless() {
        let canvas = raster(&["x = 2, y = 2", "2o$2o$$$!"]);

        assert_eq!(alive(&canvas).len(), 4);
    }

    #[test]
    fn run_past_declared_width_is_rejected() {
        let mut rle = Rle::parse(&["x = 3, y = 1", "4o!"]).unwrap();

        let err = rasterize(&mut rle).unwrap_err();

        assert!(matches!(
            err,
            RasterError::RunOutOfBounds {
                x: 0,
                y: 0,
                run: 4,
                width: 3,
                height: 1,
            }
        ));
    }

    #[test]
    fn dead_run_past_declared_width_is_rejected() {
        let mut rle = Rle::parse(&["x = 3, y = 1", "o3b!"]).unwrap();

        assert!(matches!(
            rasterize(&mut rle),
            Err(RasterError::RunOutOfBounds { .. })
        ));
    }

    #[test]
    fn run_past_declared_height_is_rejected() {
        let mut rle = Rle::parse(&["x = 1, y = 1", "o$o!"]).unwrap();

        assert!(matches!(
            rasterize(&mut rle),
            Err(RasterError::RunOutOfBounds { .. })
        ));
    }

    #[test]
    fn decode_errors_propagate() {
        let mut rle = Rle::parse(&["x = 2, y = 1", "2o"]).unwrap();

        assert!(matches!(rasterize(&mut rle), Err(RasterError::Rle(_))));
    }

    #[test]
    fn empty_pattern_is_all_background() {
        let canvas = raster(&["x = 4, y = 4", "!"]);

        assert_eq!(canvas.dimensions(), (4, 4));
        assert!(alive(&canvas).is_empty());
    }

    #[test]
    fn zero_sized_grid_decodes() {
        let canvas = raster(&["x = 0, y = 0", "!"]);

        assert_eq!(canvas.dimensions(), (0, 0));
    }
}
