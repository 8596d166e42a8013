use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::style::{CardStyle, StyleDocument, StyleScope};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StyleQuery {
    pub scope: Option<StyleScope>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StyleView {
    pub scope: StyleScope,
    #[schema(value_type = Object)]
    pub style: CardStyle,
    #[schema(value_type = Object)]
    pub document: StyleDocument,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStyleRequest {
    /// Either `{home, section}` or a flat card style applied to both scopes.
    #[schema(value_type = Object)]
    pub style: Value,
}
