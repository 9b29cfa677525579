use bstr::ByteSlice;
use topo_hash::ObjectId;

use crate::LooseError;

/// Parse an object header `"<type> <size>\0"`.
///
/// Returns `(type, content_size, header_length)` where `header_length`
/// includes the null terminator.
pub fn parse_header<'a>(
    oid: &ObjectId,
    data: &'a [u8],
) -> Result<(&'a [u8], usize, usize), LooseError> {
    let corrupt = |reason: &str| LooseError::Corrupt {
        oid: *oid,
        reason: reason.to_string(),
    };

    let null_pos = data
        .find_byte(0)
        .ok_or_else(|| corrupt("missing null terminator in header"))?;
    let header = &data[..null_pos];
    let space_pos = header
        .find_byte(b' ')
        .ok_or_else(|| corrupt("missing space in header"))?;

    let kind = &header[..space_pos];
    let size = header[space_pos + 1..]
        .to_str()
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| corrupt("invalid size in header"))?;

    Ok((kind, size, null_pos + 1))
}

/// Extract `parent` addresses from the header block of a commit body.
///
/// Scanning stops at the first blank line; the message is never examined.
/// Repeated declarations of the same parent keep only the first.
pub fn parse_commit_parents(oid: &ObjectId, body: &[u8]) -> Result<Vec<ObjectId>, LooseError> {
    let mut parents: Vec<ObjectId> = Vec::new();

    for line in body.lines() {
        if line.is_empty() {
            break;
        }
        let Some(value) = line.strip_prefix(b"parent ") else {
            continue;
        };
        let parent = value
            .trim()
            .to_str()
            .ok()
            .and_then(|hex| ObjectId::from_hex(hex).ok())
            .ok_or_else(|| LooseError::Corrupt {
                oid: *oid,
                reason: format!("malformed parent line: {}", line.as_bstr()),
            })?;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    Ok(parents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const P1: &str = "1111111111111111111111111111111111111111";
    const P2: &str = "2222222222222222222222222222222222222222";

    fn oid() -> ObjectId {
        ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap()
    }

    #[test]
    fn header_of_commit() {
        let data = b"commit 256\0tree ...";
        let (kind, size, len) = parse_header(&oid(), data).unwrap();
        assert_eq!(kind, b"commit");
        assert_eq!(size, 256);
        assert_eq!(&data[len..], b"tree ...");
    }

    #[test]
    fn header_without_terminator_is_corrupt() {
        assert!(matches!(
            parse_header(&oid(), b"commit 12"),
            Err(LooseError::Corrupt { .. })
        ));
    }

    #[test]
    fn header_with_bad_size_is_corrupt() {
        assert!(parse_header(&oid(), b"commit x\0").is_err());
        assert!(parse_header(&oid(), b"commit\0").is_err());
    }

    #[test]
    fn root_commit_has_no_parents() {
        let body = format!("tree {TREE}\nauthor A <a@x> 1 +0000\n\nmsg\n");
        assert!(parse_commit_parents(&oid(), body.as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn merge_parents_keep_declared_order() {
        let body = format!("tree {TREE}\nparent {P2}\nparent {P1}\nauthor A <a@x> 1 +0000\n\nm\n");
        let parents = parse_commit_parents(&oid(), body.as_bytes()).unwrap();
        assert_eq!(
            parents,
            vec![ObjectId::from_hex(P2).unwrap(), ObjectId::from_hex(P1).unwrap()]
        );
    }

    #[test]
    fn message_lines_are_not_headers() {
        let body = format!("tree {TREE}\n\nparent {P1}\n");
        assert!(parse_commit_parents(&oid(), body.as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn duplicate_parent_collapses() {
        let body = format!("tree {TREE}\nparent {P1}\nparent {P1}\n\n");
        assert_eq!(parse_commit_parents(&oid(), body.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn malformed_parent_is_corrupt() {
        let body = format!("tree {TREE}\nparent nothex\n\n");
        assert!(matches!(
            parse_commit_parents(&oid(), body.as_bytes()),
            Err(LooseError::Corrupt { .. })
        ));
    }
}
