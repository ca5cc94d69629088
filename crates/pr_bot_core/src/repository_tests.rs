use super::*;
use github_client::GitObject;

fn git_ref(sha: &str) -> GitRef {
    GitRef {
        reference: "refs/heads/main".to_string(),
        object: GitObject {
            sha: sha.to_string(),
            object_type: Some("commit".to_string()),
        },
    }
}

#[test]
fn test_branch_ref_from_git_ref_takes_object_sha() {
    let branch = BranchRef::from_git_ref("main", &git_ref("abc123"));

    assert_eq!(branch.name, "main");
    assert_eq!(branch.sha, "abc123");
}

#[test]
fn test_file_blob_state_absent_has_no_sha() {
    let state = FileBlobState::Absent;

    assert!(!state.exists());
    assert_eq!(state.sha(), None);
}

#[test]
fn test_file_blob_state_present_exposes_sha() {
    let state = FileBlobState::Present {
        sha: "blob-1".to_string(),
    };

    assert!(state.exists());
    assert_eq!(state.sha(), Some("blob-1"));
}

#[test]
fn test_branch_ensured_reports_creation() {
    let created = BranchEnsured::Created(BranchRef {
        name: "chatbot-1".to_string(),
        sha: "abc123".to_string(),
    });
    let existing = BranchEnsured::AlreadyExisted(BranchName::new("docs-update").unwrap());

    assert!(created.was_created());
    assert!(!existing.was_created());
    assert_eq!(created.name(), "chatbot-1");
    assert_eq!(existing.name(), "docs-update");
}
