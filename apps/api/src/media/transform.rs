use crate::errors::AppError;

pub const MIN_DIMENSION: u32 = 100;
pub const MAX_DIMENSION: u32 = 2000;

/// How the host fits the image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Scale within the box, aspect ratio preserved.
    Fit,
    /// Crop to the exact box.
    Fill,
}

impl FitMode {
    pub fn from_flag(maintain_aspect_ratio: bool) -> Self {
        if maintain_aspect_ratio {
            FitMode::Fit
        } else {
            FitMode::Fill
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitMode::Fit => "fit",
            FitMode::Fill => "fill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Content,
    Featured,
}

impl ImageType {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim).unwrap_or_default() {
            "" | "content" => Ok(ImageType::Content),
            "featured" => Ok(ImageType::Featured),
            other => Err(AppError::field(
                "imageType",
                format!("unknown image type '{other}'"),
            )),
        }
    }

    pub fn folder(&self) -> &'static str {
        match self {
            ImageType::Content => "portfolio/content",
            ImageType::Featured => "portfolio/featured",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDirective {
    pub mode: FitMode,
    pub width: u32,
    pub height: u32,
}

impl ResizeDirective {
    /// Returns `None` when neither dimension was given. A single dimension is
    /// completed at 4:3.
    pub fn from_request(
        width: Option<u32>,
        height: Option<u32>,
        maintain_aspect_ratio: bool,
    ) -> Option<Self> {
        let (width, height) = match (width.map(clamp), height.map(clamp)) {
            (None, None) => return None,
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, clamp(w * 3 / 4)),
            (None, Some(h)) => (clamp(h * 4 / 3), h),
        };
        Some(ResizeDirective {
            mode: FitMode::from_flag(maintain_aspect_ratio),
            width,
            height,
        })
    }

    /// Incoming transformation string, e.g. `c_fit,w_800,h_600`.
    pub fn transformation(&self) -> String {
        format!("c_{},w_{},h_{}", self.mode.as_str(), self.width, self.height)
    }
}

fn clamp(value: u32) -> u32 {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// Parses an optional numeric form field. Blank counts as absent.
pub fn parse_dimension(field: &str, raw: Option<&str>) -> Result<Option<u32>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| AppError::field(field, "must be a positive whole number"))
}

/// Parses a boolean form field, defaulting to `true` when absent.
pub fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, AppError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("true") | Some("1") | Some("on") => Ok(true),
        Some("false") | Some("0") | Some("off") => Ok(false),
        Some(_) => Err(AppError::field(field, "must be true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dimensions_means_no_resize() {
        assert_eq!(ResizeDirective::from_request(None, None, true), None);
    }

    #[test]
    fn test_flag_selects_mode() {
        let fit = ResizeDirective::from_request(Some(800), Some(600), true).unwrap();
        assert_eq!(fit.transformation(), "c_fit,w_800,h_600");
        let fill = ResizeDirective::from_request(Some(800), Some(600), false).unwrap();
        assert_eq!(fill.transformation(), "c_fill,w_800,h_600");
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let d = ResizeDirective::from_request(Some(5000), Some(10), true).unwrap();
        assert_eq!((d.width, d.height), (2000, 100));
    }

    #[test]
    fn test_missing_dimension_derived_at_four_by_three() {
        let d = ResizeDirective::from_request(Some(800), None, true).unwrap();
        assert_eq!((d.width, d.height), (800, 600));
        let d = ResizeDirective::from_request(None, Some(300), true).unwrap();
        assert_eq!((d.width, d.height), (400, 300));
        // derived side is clamped too
        let d = ResizeDirective::from_request(None, Some(1800), true).unwrap();
        assert_eq!((d.width, d.height), (2000, 1800));
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("width", None).unwrap(), None);
        assert_eq!(parse_dimension("width", Some(" ")).unwrap(), None);
        assert_eq!(parse_dimension("width", Some("640")).unwrap(), Some(640));
        assert!(parse_dimension("width", Some("-3")).is_err());
        assert!(parse_dimension("width", Some("wide")).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("maintainAspectRatio", None).unwrap());
        assert!(parse_flag("maintainAspectRatio", Some("TRUE")).unwrap());
        assert!(!parse_flag("maintainAspectRatio", Some("false")).unwrap());
        assert!(parse_flag("maintainAspectRatio", Some("maybe")).is_err());
    }

    #[test]
    fn test_image_type() {
        assert_eq!(ImageType::parse(None).unwrap(), ImageType::Content);
        assert_eq!(
            ImageType::parse(Some("featured")).unwrap().folder(),
            "portfolio/featured"
        );
        assert!(ImageType::parse(Some("avatar")).is_err());
    }
}
