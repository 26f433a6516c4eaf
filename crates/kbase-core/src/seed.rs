//! Built-in demo knowledge base.
//!
//! A small fixed chunk set (HR handbook, IT security policy, and
//! onboarding content) for contexts without a live store — demos,
//! examples, and tests. It is plain data handed to
//! [`crate::retrieve::KnowledgeBase::from_chunks`]; nothing in the
//! core reaches for it implicitly.

use chrono::Utc;

use crate::models::{ChunkMetadata, DocumentChunk};
use crate::token::estimate_tokens;

/// Build the demo chunk set.
pub fn demo_chunks() -> Vec<DocumentChunk> {
    let documents: [(&str, &str, &str, &[&str]); 3] = [
        (
            "handbook_1",
            "Employee Handbook.pdf",
            "pdf",
            &[
                "Remote work policy allows employees to work from home up to 3 days per week with manager approval.",
                "All employees are entitled to 15 days paid time off per year, increasing to 20 days after 3 years.",
                "Company provides health insurance with 80% premium coverage for employees and 60% for dependents.",
                "Professional development budget of $2000 per employee annually for conferences and training.",
            ],
        ),
        (
            "policies_1",
            "IT Security Policies.docx",
            "docx",
            &[
                "All company devices must use two-factor authentication and encrypted hard drives.",
                "Employees must use VPN when accessing company systems from external networks.",
                "Password requirements: minimum 12 characters with uppercase, lowercase, numbers and symbols.",
                "Software installations require IT approval and must be from approved vendor list.",
            ],
        ),
        (
            "procedures_1",
            "Onboarding Procedures.txt",
            "txt",
            &[
                "New employee orientation takes place during the first week and includes IT setup.",
                "HR conducts benefits enrollment meeting within 30 days of start date.",
                "Each new hire is assigned a buddy for their first 90 days.",
                "Performance review process begins after 6 months with quarterly check-ins.",
            ],
        ),
    ];

    let created_at = Utc::now();
    let mut chunks = Vec::new();
    for (document_id, file_name, file_type, texts) in documents {
        for (i, text) in texts.iter().enumerate() {
            let index = i as i64;
            chunks.push(DocumentChunk {
                id: DocumentChunk::composite_id(document_id, index),
                document_id: document_id.to_string(),
                chunk_index: index,
                text: text.to_string(),
                metadata: ChunkMetadata {
                    file_name: file_name.to_string(),
                    file_type: file_type.to_string(),
                    chunk_tokens: estimate_tokens(text) as i64,
                },
                created_at,
            });
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::{KnowledgeBase, DEFAULT_TOP_K};

    #[test]
    fn test_demo_set_shape() {
        let chunks = demo_chunks();
        assert_eq!(chunks.len(), 12);
        for chunk in &chunks {
            assert!(!chunk.text.trim().is_empty());
            assert_eq!(
                chunk.id,
                DocumentChunk::composite_id(&chunk.document_id, chunk.chunk_index)
            );
        }
    }

    #[test]
    fn test_demo_retrieval() {
        let kb = KnowledgeBase::from_chunks(demo_chunks());
        let hits = kb.search("remote work policy", DEFAULT_TOP_K).into_hits();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].file_name, "Employee Handbook.pdf");
        assert!(hits[0].snippet.contains("Remote work policy"));
    }
}
