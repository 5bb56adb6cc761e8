//! Parsers pour les réponses WFS INSPIRE (Cadastral Parcels)

pub mod gml;
pub mod members;

use roxmltree::Node;

/// Espace de noms WFS 2.0
pub const WFS_NS: &str = "http://www.opengis.net/wfs/2.0";

/// Espace de noms GML 3.2
pub const GML_NS: &str = "http://www.opengis.net/gml/3.2";

/// Espace de noms INSPIRE Cadastral Parcels 4.0
pub const CP_NS: &str = "http://inspire.ec.europa.eu/schemas/cp/4.0";

/// Espace de noms XLink
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Premier enfant direct portant ce nom qualifié
pub(crate) fn first_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}

/// Premier descendant (ordre du document) portant ce nom qualifié
pub(crate) fn first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.has_tag_name((ns, name)))
}
