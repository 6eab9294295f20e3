use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyComment,
    EmptyTitle,
    EmptyContent,
    MissingImage,
    EmptyCategoryName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ValidationError::EmptyComment => "Comment must not be empty",
            ValidationError::EmptyTitle => "Recipe name must not be empty",
            ValidationError::EmptyContent => "Recipe must not be empty",
            ValidationError::MissingImage => "Please choose an image",
            ValidationError::EmptyCategoryName => "Category name must not be empty",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for ValidationError {}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn validate_comment(content: &str) -> Result<(), ValidationError> {
    if is_blank(content) {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}

pub fn validate_post(title: &str, content: &str, has_image: bool) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(ValidationError::EmptyTitle);
    }
    if is_blank(content) {
        return Err(ValidationError::EmptyContent);
    }
    if !has_image {
        return Err(ValidationError::MissingImage);
    }
    Ok(())
}

pub fn validate_category(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(())
}
