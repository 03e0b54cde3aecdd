//! Small helpers shared by the higher level diff functions.

/// A maximal run of consecutive items sharing the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, T> {
    /// The key shared by all items.
    pub key: K,
    /// The items in input order.  Never empty.
    pub items: Vec<T>,
}

/// Splits a sequence into runs of consecutive items with equal keys.
///
/// A new group starts whenever the key changes, so the same key can show
/// up in several groups.
///
/// ```rust
/// use resemble::utils::group_when_changed;
///
/// let groups = group_when_changed(vec![1, 3, 2, 4, 5], |x| x % 2 == 0);
/// let keys = groups.iter().map(|g| (g.key, g.items.len())).collect::<Vec<_>>();
/// assert_eq!(keys, vec![(false, 2), (true, 2), (false, 1)]);
/// ```
pub fn group_when_changed<I, K, F>(items: I, mut key: F) -> Vec<Group<K, I::Item>>
where
    I: IntoIterator,
    K: PartialEq,
    F: FnMut(&I::Item) -> K,
{
    let mut rv: Vec<Group<K, I::Item>> = Vec::new();
    for item in items {
        let item_key = key(&item);
        match rv.last_mut() {
            Some(group) if group.key == item_key => group.items.push(item),
            _ => rv.push(Group {
                key: item_key,
                items: vec![item],
            }),
        }
    }
    rv
}

#[test]
fn test_group_when_changed() {
    let groups = group_when_changed("aabccc".chars(), |c| *c);
    insta::assert_debug_snapshot!(groups, @r###"
    [
        Group {
            key: 'a',
            items: [
                'a',
                'a',
            ],
        },
        Group {
            key: 'b',
            items: [
                'b',
            ],
        },
        Group {
            key: 'c',
            items: [
                'c',
                'c',
                'c',
            ],
        },
    ]
    "###);
    assert!(group_when_changed(Vec::<u8>::new(), |_| ()).is_empty());
}
