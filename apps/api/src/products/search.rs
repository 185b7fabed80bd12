//! In-process vector ranking for product search.
//!
//! Query and product vectors come from the same embedding model, so cosine
//! distance is a meaningful order. Ranking happens here rather than in SQL:
//! the catalog is fetched and scored in memory, products without a stored
//! embedding are skipped.

use crate::models::product::Product;

/// Cosine similarity between two vectors, in [-1, 1].
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs, which ranks
/// such pairs behind any genuine match.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Ranks products by similarity to the query vector, most similar first,
/// truncated to `limit`. Products without an embedding never match.
pub fn rank_by_similarity(products: Vec<Product>, query: &[f32], limit: usize) -> Vec<Product> {
    let mut scored: Vec<(f32, Product)> = products
        .into_iter()
        .filter_map(|p| {
            let score = cosine_similarity(p.embedding.as_deref()?, query);
            Some((score, p))
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn product(name: &str, embedding: Option<Vec<f32>>) -> Product {
        Product {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            embedding,
        }
    }

    #[test]
    fn test_identical_vectors_have_similarity_one() {
        let v = vec![0.5, 0.5, 0.7071];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthogonal_vectors_have_similarity_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_ranking_orders_most_similar_first() {
        let products = vec![
            product("far", Some(vec![0.0, 1.0])),
            product("near", Some(vec![1.0, 0.05])),
            product("mid", Some(vec![0.7, 0.7])),
        ];
        let ranked = rank_by_similarity(products, &[1.0, 0.0], 10);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_ranking_respects_limit() {
        let products = vec![
            product("a", Some(vec![1.0, 0.0])),
            product("b", Some(vec![0.9, 0.1])),
            product("c", Some(vec![0.8, 0.2])),
        ];
        let ranked = rank_by_similarity(products, &[1.0, 0.0], 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_products_without_embedding_are_skipped() {
        let products = vec![product("none", None), product("some", Some(vec![1.0, 0.0]))];
        let ranked = rank_by_similarity(products, &[1.0, 0.0], 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "some");
    }
}
