//! DynamoDB repository implementation.
//!
//! Implements `ReviewRepository` from `moviereviews_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use moviereviews_core::reviews::{MovieId, MovieReview, ReviewFilter, ReviewKey};
use moviereviews_core::storage::{RepositoryError, Result, ReviewRepository};

use crate::config::Config;

use super::conversions::{item_to_review, review_to_item, ATTR_CONTENT, ATTR_MOVIE_ID};
use super::error::{map_get_item_error, map_put_item_error, map_query_error, map_update_item_error};
use super::queries::{
    movie_reviews_query, review_key, reviewer_reviews_query, QuerySpec, CONDITION_ABSENT,
    CONDITION_PRESENT, UPDATE_CONTENT,
};

/// DynamoDB-based repository implementation.
///
/// Holds the one SDK client of the process. The client is internally
/// reference counted and safe to share across concurrent requests.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    reviewer_index_name: String,
    consistent_reads: bool,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            reviewer_index_name: "reviewerIndex".to_string(),
            consistent_reads: false,
        }
    }

    /// Sets the name of the reviewer index.
    pub fn with_reviewer_index(mut self, index_name: impl Into<String>) -> Self {
        self.reviewer_index_name = index_name.into();
        self
    }

    /// Requests strongly consistent reads on the base table.
    pub fn with_consistent_reads(mut self, consistent_reads: bool) -> Self {
        self.consistent_reads = consistent_reads;
        self
    }

    /// Creates a repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain, the configured region and,
    /// when set, a custom endpoint such as a local DynamoDB.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        tracing::info!(
            table = %config.table_name,
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "DynamoDB client configured"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
            .with_reviewer_index(config.reviewer_index_name.clone())
            .with_consistent_reads(config.consistent_reads)
    }

    /// Runs a query to completion, following `LastEvaluatedKey` across pages.
    async fn query_all(&self, spec: QuerySpec) -> Result<Vec<MovieReview>> {
        let mut reviews = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let response = self
                .client
                .query()
                .table_name(&self.table_name)
                .set_index_name(spec.index_name.clone())
                .key_condition_expression(&spec.key_condition)
                .set_filter_expression(spec.filter_expression.clone())
                .set_expression_attribute_names(Some(spec.names.clone()))
                .set_expression_attribute_values(Some(spec.values.clone()))
                .set_consistent_read(spec.consistent_read)
                .set_exclusive_start_key(last_evaluated_key.take())
                .send()
                .await
                .map_err(map_query_error)?;

            for item in response.items.unwrap_or_default() {
                reviews.push(item_to_review(&item)?);
            }

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => last_evaluated_key = Some(key),
                _ => break,
            }
        }

        Ok(reviews)
    }
}

#[async_trait]
impl ReviewRepository for DynamoDbRepository {
    async fn get_review(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
    ) -> Result<Option<MovieReview>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(review_key(movie_id, reviewer_name)))
            .consistent_read(self.consistent_reads)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_review(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_reviews_for_movie(
        &self,
        movie_id: MovieId,
        filter: &ReviewFilter,
    ) -> Result<Vec<MovieReview>> {
        self.query_all(movie_reviews_query(movie_id, filter, self.consistent_reads))
            .await
    }

    async fn get_reviews_by_reviewer(&self, reviewer_name: &str) -> Result<Vec<MovieReview>> {
        self.query_all(reviewer_reviews_query(
            reviewer_name,
            &self.reviewer_index_name,
        ))
        .await
    }

    async fn put_review(&self, review: &MovieReview) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(review_to_item(review)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &review.key()))?;

        Ok(())
    }

    async fn insert_review(&self, review: &MovieReview) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(review_to_item(review)))
            .condition_expression(CONDITION_ABSENT)
            .expression_attribute_names("#movieId", ATTR_MOVIE_ID)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &review.key()))?;

        Ok(())
    }

    async fn update_review_content(
        &self,
        movie_id: MovieId,
        reviewer_name: &str,
        content: &str,
    ) -> Result<MovieReview> {
        let key = ReviewKey::new(movie_id, reviewer_name);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(review_key(movie_id, reviewer_name)))
            .update_expression(UPDATE_CONTENT)
            .condition_expression(CONDITION_PRESENT)
            .expression_attribute_names("#movieId", ATTR_MOVIE_ID)
            .expression_attribute_names("#content", ATTR_CONTENT)
            .expression_attribute_values(":content", AttributeValue::S(content.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &key))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::Serialization("UpdateItem returned no attributes".to_string())
        })?;

        item_to_review(&attributes)
    }
}
