//! Export configuration types

/// Configuration for a raw export session.
///
/// All values arrive already resolved from the calling application; no flag
/// parsing happens here.
#[derive(Debug, Clone)]
pub struct ExportParams {
    /// Whether automatic scaling is in effect upstream. When disabled, the
    /// extractor expands sub-16-bit data to the full 16-bit range itself.
    pub auto_scale: bool,
    /// Bit depth of the sensor samples (e.g. 12, 14, or 16)
    pub input_bps: u32,
    /// Requested output bit depth; only 16 triggers range expansion
    pub output_bps: u32,
    /// Gamma for the processed-path tone curve
    pub gamma: f64,
    /// Whether the TIFF header carries a DateTime stamp
    pub include_timestamp: bool,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            auto_scale: true,
            input_bps: 16,
            output_bps: 16,
            gamma: 2.2,
            include_timestamp: true,
        }
    }
}

impl ExportParams {
    pub fn builder() -> ExportParamsBuilder {
        ExportParamsBuilder::default()
    }
}

/// Builder for ExportParams
#[derive(Default)]
pub struct ExportParamsBuilder {
    auto_scale: Option<bool>,
    input_bps: Option<u32>,
    output_bps: Option<u32>,
    gamma: Option<f64>,
    include_timestamp: Option<bool>,
}

impl ExportParamsBuilder {
    pub fn auto_scale(mut self, enable: bool) -> Self {
        self.auto_scale = Some(enable);
        self
    }

    pub fn input_bps(mut self, bits: u32) -> Self {
        self.input_bps = Some(bits);
        self
    }

    pub fn output_bps(mut self, bits: u32) -> Self {
        self.output_bps = Some(bits);
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn include_timestamp(mut self, enable: bool) -> Self {
        self.include_timestamp = Some(enable);
        self
    }

    pub fn build(self) -> ExportParams {
        let default = ExportParams::default();
        ExportParams {
            auto_scale: self.auto_scale.unwrap_or(default.auto_scale),
            input_bps: self.input_bps.unwrap_or(default.input_bps),
            output_bps: self.output_bps.unwrap_or(default.output_bps),
            gamma: self.gamma.unwrap_or(default.gamma),
            include_timestamp: self.include_timestamp.unwrap_or(default.include_timestamp),
        }
    }
}
