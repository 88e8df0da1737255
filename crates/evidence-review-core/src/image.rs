use crate::record::Record;

/// Shown when a record has no image or the image cannot be loaded.
pub const PLACEHOLDER_URL: &str = "https://via.placeholder.com/600x800?text=Imagen+no+disponible";

/// Turns a stored image path into a URL on the image endpoint.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    /// Image endpoint prefix, always ending in `/`.
    base: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(base: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self {
            base,
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Only the final path segment is used, percent-encoded.
    pub fn resolve(&self, path: Option<&str>) -> String {
        let filename = path
            .and_then(|p| p.trim().rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty());
        match filename {
            Some(name) => format!("{}{}", self.base, urlencoding::encode(name)),
            None => self.placeholder.clone(),
        }
    }

    /// Fresh display slot for `record`.
    pub fn slot_for(&self, record: &Record) -> ImageSlot {
        ImageSlot::new(self.resolve(record.image_path()), self.placeholder.clone())
    }
}

/// The image URL currently displayed for one record view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    url: String,
    placeholder: String,
    fell_back: bool,
}

impl ImageSlot {
    pub fn new(url: String, placeholder: String) -> Self {
        Self {
            url,
            placeholder,
            fell_back: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_placeholder(&self) -> bool {
        self.fell_back || self.url == self.placeholder
    }

    /// Swap to the placeholder after a load failure. Only the first failure
    /// has an effect; returns whether the URL changed.
    pub fn fail(&mut self) -> bool {
        if self.fell_back {
            return false;
        }
        self.fell_back = true;
        if self.url == self.placeholder {
            return false;
        }
        self.url = self.placeholder.clone();
        true
    }
}
