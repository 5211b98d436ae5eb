//! Conversions from flat buffers, as handed over by JavaScript.

use ndarray::{Array2, Array3};

use crate::error::{RedactError, Result};
use crate::selection::RedactBox;

/// Reshape interleaved pixel data into (height, width, channels).
pub fn image_from_flat<T: Clone>(
    data: &[T],
    height: usize,
    width: usize,
    channels: usize,
) -> Result<Array3<T>> {
    Array3::from_shape_vec((height, width, channels), data.to_vec()).map_err(|_| {
        RedactError::BufferShape {
            len: data.len(),
            height,
            width,
            channels,
        }
    })
}

/// Read boxes from `[min_x, min_y, max_x, max_y, ...]`.
pub fn boxes_from_flat(values: &[f32]) -> Result<Vec<RedactBox>> {
    let chunks = values.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(RedactError::MalformedBoxes(values.len()));
    }
    chunks
        .map(|c| RedactBox::new(c[0], c[1], c[2], c[3]))
        .collect()
}

/// Read an optional mask; an empty slice means no mask, non-zero is selected.
pub fn mask_from_flat(data: &[u8], height: usize, width: usize) -> Result<Option<Array2<bool>>> {
    if data.is_empty() {
        return Ok(None);
    }
    let mask = Array2::from_shape_vec((height, width), data.iter().map(|&v| v != 0).collect())
        .map_err(|_| RedactError::BufferShape {
            len: data.len(),
            height,
            width,
            channels: 1,
        })?;
    Ok(Some(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_flat() {
        let data: Vec<u8> = (0..24).collect();
        let img = image_from_flat(&data, 2, 3, 4).unwrap();
        assert_eq!(img[[1, 2, 3]], 23);
        assert_eq!(img[[0, 1, 0]], 4);
    }

    #[test]
    fn test_image_from_flat_wrong_length() {
        let data = vec![0u8; 10];
        assert_eq!(
            image_from_flat(&data, 2, 2, 3).unwrap_err(),
            RedactError::BufferShape {
                len: 10,
                height: 2,
                width: 2,
                channels: 3
            }
        );
    }

    #[test]
    fn test_boxes_from_flat() {
        let boxes = boxes_from_flat(&[1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 5.0, 5.0]).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].max_x(), 5.0);
        assert!(boxes_from_flat(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_boxes_from_flat_rejects_partial_and_inverted() {
        assert_eq!(
            boxes_from_flat(&[1.0, 2.0, 3.0]).unwrap_err(),
            RedactError::MalformedBoxes(3)
        );
        assert!(matches!(
            boxes_from_flat(&[5.0, 0.0, 1.0, 1.0]),
            Err(RedactError::InvertedBox { .. })
        ));
    }

    #[test]
    fn test_mask_from_flat() {
        assert_eq!(mask_from_flat(&[], 2, 2).unwrap(), None);

        let mask = mask_from_flat(&[0, 255, 1, 0], 2, 2).unwrap().unwrap();
        assert!(!mask[[0, 0]]);
        assert!(mask[[0, 1]]);
        assert!(mask[[1, 0]]);

        assert!(mask_from_flat(&[1, 1, 1], 2, 2).is_err());
    }
}
