pub use async_graphql::Error as GqlError;
pub use async_graphql::Result as GqlResult;
pub use async_graphql::dynamic::{
    Field,
    FieldFuture,
    FieldValue,
    InputValue,
    Object,
    Scalar,
    Subscription,
    SubscriptionField,
    SubscriptionFieldFuture,
    TypeRef,
};

pub use crate::graphql::scalars::*;
