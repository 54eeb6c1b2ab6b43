use ndarray::{ArrayView3, ArrayViewMut3};

/// A single video/image frame: contiguous interleaved bytes in row-major
/// order, `width * height * channels` long.
///
/// Decoding and encoding happen at I/O boundaries only; the core treats
/// pixel data as an opaque rectangular buffer. `index` is the position of
/// the frame within its stream and drives the ordering guarantees of the
/// video pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// An all-black frame of the given dimensions.
    pub fn zeros(width: u32, height: u32, channels: u8, index: usize) -> Self {
        let len = (width as usize) * (height as usize) * (channels as usize);
        Self::new(vec![0u8; len], width, height, channels, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn same_dimensions(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Byte offset of pixel `(x, y)`. Caller must keep coordinates in bounds.
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * self.channels as usize
    }

    /// Channel values of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let off = self.pixel_offset(x, y);
        &self.data[off..off + self.channels as usize]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let off = self.pixel_offset(x, y);
        let ch = self.channels as usize;
        &mut self.data[off..off + ch]
    }

    /// Rectangular copy of the region `(x, y, w, h)`, clipped to the frame.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Frame {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        let x0 = x.min(x1);
        let y0 = y.min(y1);
        let (cw, crop_h) = (x1 - x0, y1 - y0);
        let channels = self.channels as usize;
        let mut out = Vec::with_capacity((cw as usize) * (crop_h as usize) * channels);
        for row in y0..y1 {
            let start = self.pixel_offset(x0 as usize, row as usize);
            out.extend_from_slice(&self.data[start..start + cw as usize * channels]);
        }
        Frame::new(out, cw, crop_h, self.channels, self.index)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_zeros_is_black() {
        let frame = Frame::zeros(4, 3, 3, 0);
        assert_eq!(frame.data().len(), 36);
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut frame = Frame::zeros(3, 2, 3, 0);
        frame.pixel_mut(2, 1).copy_from_slice(&[10, 20, 30]);
        assert_eq!(frame.pixel(2, 1), &[10, 20, 30]);
        assert_eq!(frame.pixel(0, 0), &[0, 0, 0]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    fn test_crop_extracts_region() {
        // 4x4 single channel, values = row * 4 + col
        let data: Vec<u8> = (0..16).collect();
        let frame = Frame::new(data, 4, 4, 1, 0);
        let crop = frame.crop(1, 2, 2, 2);
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.data(), &[9, 10, 13, 14]);
    }

    #[test]
    fn test_crop_clips_to_frame_bounds() {
        let frame = Frame::zeros(4, 4, 3, 0);
        let crop = frame.crop(3, 3, 10, 10);
        assert_eq!(crop.width(), 1);
        assert_eq!(crop.height(), 1);
    }

    #[test]
    fn test_as_ndarray_shape_and_access() {
        let mut data = vec![0u8; 24]; // 2x4x3
        data[4 * 3] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_same_dimensions() {
        let a = Frame::zeros(4, 4, 3, 0);
        let b = Frame::zeros(4, 4, 3, 9);
        let c = Frame::zeros(4, 5, 3, 0);
        assert!(a.same_dimensions(&b));
        assert!(!a.same_dimensions(&c));
    }
}
