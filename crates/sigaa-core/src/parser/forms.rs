//! JSF form plumbing for SIGAA pages
//!
//! The portal is a JavaServer Faces application: every form post must
//! echo back the hidden view state, and selects carry the option values
//! the server expects. These helpers pull those pieces out of a page so
//! the client can replay the forms over plain HTTP.

use scraper::{Html, Selector};

/// Extract the hidden `javax.faces.ViewState` value from a page.
pub fn extract_view_state(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("input[name='javax.faces.ViewState']").ok()?;
    let input = document.select(&selector).next()?;
    input.value().attr("value").map(|v| v.to_string())
}

/// Find the option value of the academic-unit select whose label
/// contains `unit_name`.
pub fn find_unit_option(html: &str, unit_name: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("select[id='form:selectUnidade'] option").ok()?;

    for option in document.select(&selector) {
        let label = option.text().collect::<String>();
        if label.contains(unit_name) {
            return option.value().attr("value").map(|v| v.to_string());
        }
    }

    None
}

/// Find the bond-selection link matching a registration number.
///
/// Accounts with more than one active bond land on a selection page
/// after login; the link text carries the registration number.
pub fn find_bond_link(html: &str, registration: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("table.tabela-selecao-vinculo a.withoutFormat").ok()?;

    for link in document.select(&selector) {
        let text = link.text().collect::<String>();
        if text.contains(registration) {
            return link.value().attr("href").map(|v| v.to_string());
        }
    }

    None
}

/// Extract the portal's error banner from a login response, if any.
pub fn extract_login_error(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in ["p.erros", ".erros", ".error"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(el) = document.select(&selector).next() {
                let text = el.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_view_state() {
        let html = r#"
            <form>
                <input type="hidden" name="javax.faces.ViewState" value="j_id42:state" />
            </form>
        "#;
        assert_eq!(extract_view_state(html).as_deref(), Some("j_id42:state"));
        assert_eq!(extract_view_state("<html></html>"), None);
    }

    #[test]
    fn test_find_unit_option() {
        let html = r#"
            <select id="form:selectUnidade">
                <option value="0">-- SELECIONE --</option>
                <option value="1482">PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO</option>
                <option value="1501">PROGRAMA DE PÓS-GRADUAÇÃO EM TECNOLOGIA DA INFORMAÇÃO</option>
            </select>
        "#;
        assert_eq!(
            find_unit_option(html, "ADMINISTRAÇÃO").as_deref(),
            Some("1482")
        );
        assert_eq!(
            find_unit_option(html, "TECNOLOGIA DA INFORMAÇÃO").as_deref(),
            Some("1501")
        );
        assert_eq!(find_unit_option(html, "FILOSOFIA"), None);
    }

    #[test]
    fn test_find_bond_link() {
        let html = r#"
            <table class="tabela-selecao-vinculo">
                <tr><td><a class="withoutFormat" href="/sigaa/escolhaVinculo.do?id=1">Discente - 20250001</a></td></tr>
                <tr><td><a class="withoutFormat" href="/sigaa/escolhaVinculo.do?id=2">Docente - 20250002</a></td></tr>
            </table>
        "#;
        assert_eq!(
            find_bond_link(html, "20250002").as_deref(),
            Some("/sigaa/escolhaVinculo.do?id=2")
        );
        assert_eq!(find_bond_link(html, "99999999"), None);
    }

    #[test]
    fn test_extract_login_error() {
        let html = r#"<p class="erros">Usuário e/ou senha inválidos</p>"#;
        assert_eq!(
            extract_login_error(html).as_deref(),
            Some("Usuário e/ou senha inválidos")
        );
        assert_eq!(extract_login_error("<html><body></body></html>"), None);
    }
}
