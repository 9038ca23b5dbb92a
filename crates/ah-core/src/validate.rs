//! Semantic checks that run after a payload has been deserialized.
//! Shape errors (missing fields, wrong types) are serde's job.

use crate::error::{AppError, Result};
use crate::models::{
    CommentInput, FarmerPatch, NewComment, NewCommunityPost, NewFarmer, NewNotification,
    NewProject, NotificationInput, ProjectInput, ProjectPatch,
};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn email(value: &str) -> Result<()> {
    required("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::validation(format!("email {value:?} is not an address"))),
    }
}

fn non_negative(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(AppError::validation(format!("{field} must be a non-negative number")))
        }
        _ => Ok(()),
    }
}

impl Validate for NewFarmer {
    fn validate(&self) -> Result<()> {
        email(&self.email)?;
        required("name", &self.name)?;
        required("farmingType", &self.farming_type)?;
        if let Some(age) = self.age {
            if !(0..=150).contains(&age) {
                return Err(AppError::validation("age is out of range"));
            }
        }
        Ok(())
    }
}

impl Validate for FarmerPatch {
    fn validate(&self) -> Result<()> {
        if let Some(value) = &self.email {
            email(value)?;
        }
        if let Some(value) = &self.name {
            required("name", value)?;
        }
        if let Some(value) = &self.farming_type {
            required("farmingType", value)?;
        }
        if let Some(Some(age)) = self.age {
            if !(0..=150).contains(&age) {
                return Err(AppError::validation("age is out of range"));
            }
        }
        Ok(())
    }
}

impl Validate for ProjectInput {
    fn validate(&self) -> Result<()> {
        required("type", &self.kind)?;
        required("name", &self.name)?;
        non_negative("landSize", self.land_size)?;
        non_negative("marketPrice", self.market_price)?;
        non_negative("expectedYield", self.expected_yield.map(|v| v as f64))?;
        if let Some(status) = &self.status {
            required("status", status)?;
        }
        Ok(())
    }
}

impl Validate for NewProject {
    fn validate(&self) -> Result<()> {
        self.input.validate()
    }
}

impl Validate for ProjectPatch {
    fn validate(&self) -> Result<()> {
        if let Some(value) = &self.kind {
            required("type", value)?;
        }
        if let Some(value) = &self.name {
            required("name", value)?;
        }
        if let Some(value) = &self.status {
            required("status", value)?;
        }
        non_negative("landSize", self.land_size.flatten())?;
        non_negative("marketPrice", self.market_price.flatten())?;
        non_negative("expectedYield", self.expected_yield.flatten().map(|v| v as f64))?;
        Ok(())
    }
}

impl Validate for NewCommunityPost {
    fn validate(&self) -> Result<()> {
        required("farmerName", &self.farmer_name)?;
        required("content", &self.content)?;
        required("category", &self.category)
    }
}

impl Validate for CommentInput {
    fn validate(&self) -> Result<()> {
        required("farmerName", &self.farmer_name)?;
        required("content", &self.content)
    }
}

impl Validate for NewComment {
    fn validate(&self) -> Result<()> {
        self.input.validate()
    }
}

impl Validate for NotificationInput {
    fn validate(&self) -> Result<()> {
        required("type", &self.kind)?;
        required("title", &self.title)?;
        required("message", &self.message)
    }
}

impl Validate for NewNotification {
    fn validate(&self) -> Result<()> {
        self.input.validate()
    }
}
