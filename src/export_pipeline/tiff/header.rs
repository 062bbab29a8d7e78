use chrono::{DateTime, Local};

/// Directory tag and field-type constants for the fixed header.
pub mod tag {
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const X_RESOLUTION: u16 = 282;
    pub const Y_RESOLUTION: u16 = 283;
    pub const RESOLUTION_UNIT: u16 = 296;
    pub const DATE_TIME: u16 = 306;

    pub const TYPE_ASCII: u16 = 2;
    pub const TYPE_SHORT: u16 = 3;
    pub const TYPE_LONG: u16 = 4;
    pub const TYPE_RATIONAL: u16 = 5;
}

pub const TAG_COUNT: usize = 13;

/// Byte offset of the first IFD: directly after the 8-byte file header.
const IFD_OFFSET: u32 = 8;
/// Directory entries start here; each is 12 bytes.
const TAGS_OFFSET: usize = 10;
/// Zero next-IFD word terminating the directory.
const NEXT_IFD_OFFSET: usize = TAGS_OFFSET + TAG_COUNT * 12;
/// X/Y resolution rationals: four 32-bit words.
const RESOLUTION_OFFSET: usize = NEXT_IFD_OFFSET + 4;
const BPS_OFFSET: usize = RESOLUTION_OFFSET + 16;
const DATE_OFFSET: usize = BPS_OFFSET + 8;

/// Total encoded header size; the strip payload follows immediately.
pub const HEADER_LEN: usize = DATE_OFFSET + 20;

/// One 12-byte Image File Directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffTag {
    pub id: u16,
    pub kind: u16,
    pub count: u32,
    pub value: u32,
}

impl TiffTag {
    fn encode_into(&self, buf: &mut [u8]) {
        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&self.kind.to_be_bytes());
        buf[4..8].copy_from_slice(&self.count.to_be_bytes());
        // Inline SHORT values occupy the leading bytes of the value field;
        // everything else is a full 32-bit word (value or offset).
        if self.kind == tag::TYPE_SHORT && self.count <= 2 {
            buf[8..10].copy_from_slice(&(self.value as u16).to_be_bytes());
        } else {
            buf[8..12].copy_from_slice(&self.value.to_be_bytes());
        }
    }
}

/// The fixed-size header of a single-strip grayscale TIFF.
///
/// The byte-order marker is fixed big-endian ("MM") and every header integer
/// is encoded accordingly. The directory holds exactly [`TAG_COUNT`] entries
/// in ascending tag order, terminated by a zero next-IFD word, then the
/// resolution rationals, the bits-per-sample array, and the timestamp.
#[derive(Debug, Clone)]
pub struct TiffHeader {
    tags: [TiffTag; TAG_COUNT],
    resolution: [u32; 4],
    bits_per_sample: [u16; 4],
    date: [u8; 20],
}

impl TiffHeader {
    pub fn new(width: u32, height: u32, timestamp: Option<DateTime<Local>>) -> Self {
        let long = |id, value| TiffTag {
            id,
            kind: tag::TYPE_LONG,
            count: 1,
            value,
        };
        let short = |id, value| TiffTag {
            id,
            kind: tag::TYPE_SHORT,
            count: 1,
            value,
        };

        let tags = [
            long(tag::IMAGE_WIDTH, width),
            long(tag::IMAGE_LENGTH, height),
            short(tag::BITS_PER_SAMPLE, 16),
            short(tag::COMPRESSION, 1),
            short(tag::PHOTOMETRIC, 1),
            long(tag::STRIP_OFFSETS, HEADER_LEN as u32),
            short(tag::SAMPLES_PER_PIXEL, 1),
            long(tag::ROWS_PER_STRIP, height),
            long(tag::STRIP_BYTE_COUNTS, height * width * 2),
            TiffTag {
                id: tag::X_RESOLUTION,
                kind: tag::TYPE_RATIONAL,
                count: 1,
                value: RESOLUTION_OFFSET as u32,
            },
            TiffTag {
                id: tag::Y_RESOLUTION,
                kind: tag::TYPE_RATIONAL,
                count: 1,
                value: RESOLUTION_OFFSET as u32 + 8,
            },
            short(tag::RESOLUTION_UNIT, 2),
            TiffTag {
                id: tag::DATE_TIME,
                kind: tag::TYPE_ASCII,
                count: 20,
                value: DATE_OFFSET as u32,
            },
        ];

        let mut date = [0u8; 20];
        if let Some(stamp) = timestamp {
            let text = stamp.format("%Y:%m:%d %H:%M:%S").to_string();
            let bytes = text.as_bytes();
            let len = bytes.len().min(19);
            date[..len].copy_from_slice(&bytes[..len]);
        }

        Self {
            tags,
            resolution: [300, 1, 300, 1],
            bits_per_sample: [16; 4],
            date,
        }
    }

    pub fn tags(&self) -> &[TiffTag] {
        &self.tags
    }

    /// Looks up a directory entry's value field by tag id.
    pub fn tag_value(&self, id: u16) -> Option<u32> {
        self.tags.iter().find(|t| t.id == id).map(|t| t.value)
    }

    pub fn date(&self) -> &[u8; 20] {
        &self.date
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..2].copy_from_slice(b"MM");
        buf[2..4].copy_from_slice(&42u16.to_be_bytes());
        buf[4..8].copy_from_slice(&IFD_OFFSET.to_be_bytes());
        buf[8..10].copy_from_slice(&(TAG_COUNT as u16).to_be_bytes());
        for (i, entry) in self.tags.iter().enumerate() {
            let at = TAGS_OFFSET + i * 12;
            entry.encode_into(&mut buf[at..at + 12]);
        }
        // buf[NEXT_IFD_OFFSET..][..4] stays zero: no further directories.
        for (i, word) in self.resolution.iter().enumerate() {
            let at = RESOLUTION_OFFSET + i * 4;
            buf[at..at + 4].copy_from_slice(&word.to_be_bytes());
        }
        for (i, word) in self.bits_per_sample.iter().enumerate() {
            let at = BPS_OFFSET + i * 2;
            buf[at..at + 2].copy_from_slice(&word.to_be_bytes());
        }
        buf[DATE_OFFSET..DATE_OFFSET + 20].copy_from_slice(&self.date);
        buf
    }
}
