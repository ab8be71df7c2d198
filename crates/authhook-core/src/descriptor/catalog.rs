//! Reference command catalog of the authentication product
//!
//! Commands whose arguments include a password are flagged sensitive; the log
//! filter is built from these flags.

use super::tree::{DescriptorTree, DescriptorTreeBuilder};
use crate::errors::Result;

const SENSITIVE: bool = true;
const PLAIN: bool = false;

/// Build the product's command tree
///
/// # Errors
///
/// Only fails if a catalog entry breaks a tree construction rule.
pub fn authme_commands() -> Result<DescriptorTree> {
    let mut tree = DescriptorTreeBuilder::new();

    let authme = tree.add_root(&["authme"], PLAIN)?;
    tree.add_child(authme, &["help", "hlp", "h", "sos", "?"], PLAIN)?;
    tree.add_child(authme, &["register", "reg", "r"], SENSITIVE)?;
    tree.add_child(authme, &["unregister", "unreg", "unr", "delete", "del"], PLAIN)?;
    tree.add_child(authme, &["forcelogin", "login"], PLAIN)?;
    tree.add_child(authme, &["password", "changepassword", "changepass", "cp"], SENSITIVE)?;
    tree.add_child(authme, &["lastlogin", "ll"], PLAIN)?;
    tree.add_child(authme, &["accounts", "account"], PLAIN)?;
    tree.add_child(authme, &["email", "mail", "getemail", "getmail"], PLAIN)?;
    tree.add_child(authme, &["setemail", "setmail", "chgemail", "chgmail"], PLAIN)?;
    tree.add_child(authme, &["getip", "ip"], PLAIN)?;
    tree.add_child(authme, &["spawn", "home"], PLAIN)?;
    tree.add_child(authme, &["setspawn", "chgspawn"], PLAIN)?;
    tree.add_child(authme, &["purge"], PLAIN)?;
    tree.add_child(authme, &["reload", "rld"], PLAIN)?;
    tree.add_child(authme, &["version", "ver", "v", "about", "info"], PLAIN)?;
    tree.add_child(authme, &["converter", "convert", "conv"], PLAIN)?;
    tree.add_child(authme, &["messages", "msg"], PLAIN)?;

    tree.add_root(&["login", "l", "log"], SENSITIVE)?;
    tree.add_root(&["logout"], PLAIN)?;
    tree.add_root(&["register", "reg"], SENSITIVE)?;
    tree.add_root(&["unregister", "unreg"], SENSITIVE)?;
    tree.add_root(&["changepassword", "cp"], SENSITIVE)?;

    let email = tree.add_root(&["email"], PLAIN)?;
    tree.add_child(email, &["help", "hlp", "h", "sos", "?"], PLAIN)?;
    tree.add_child(email, &["show", "myemail"], PLAIN)?;
    tree.add_child(email, &["add", "addemail", "addmail"], PLAIN)?;
    tree.add_child(email, &["change", "changeemail", "changemail"], PLAIN)?;
    tree.add_child(email, &["recover", "recovery", "recoveremail", "recovermail"], PLAIN)?;
    tree.add_child(email, &["code"], PLAIN)?;

    tree.add_root(&["captcha"], PLAIN)?;
    tree.add_root(&["verification"], PLAIN)?;

    let totp = tree.add_root(&["totp"], PLAIN)?;
    tree.add_child(totp, &["code", "c"], PLAIN)?;
    tree.add_child(totp, &["add"], PLAIN)?;
    tree.add_child(totp, &["confirm"], PLAIN)?;
    tree.add_child(totp, &["remove"], PLAIN)?;

    Ok(tree.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builds() {
        let tree = authme_commands().unwrap();
        assert!(!tree.is_empty());
        assert!(tree.find(&["authme", "changepass"]).is_some());
    }

    #[test]
    fn test_sensitive_flags() {
        let tree = authme_commands().unwrap();
        let sensitive: Vec<Vec<&str>> = tree
            .iter()
            .filter(|(_, node)| node.has_sensitive_argument())
            .map(|(id, node)| {
                let mut path = tree.ancestor_labels(id);
                path.push(node.primary_label());
                path
            })
            .collect();

        assert_eq!(
            sensitive,
            vec![
                vec!["authme", "register"],
                vec!["authme", "password"],
                vec!["login"],
                vec!["register"],
                vec!["unregister"],
                vec!["changepassword"],
            ]
        );
    }
}
