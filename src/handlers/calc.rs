//! # Calculadora
//! src/handlers/calc.rs
//!
//! Handler para `/calc?a=N&b=M`: suma dos enteros y responde en HTML.
//!
//! - La query se separa por `&` y cada par por el primer `=`.
//! - Las claves se comparan completas (`band=5` no es `a`).
//! - Si una clave se repite, gana la primera aparición.
//! - Un valor ausente o no numérico vale 0.
//! - Los operandos son `i32` (saturados) y la suma se calcula en `i64`,
//!   así que nunca desborda.

use crate::http::Response;

/// Operandos extraídos de la query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalcQuery {
    pub a: i32,
    pub b: i32,
}

impl CalcQuery {
    /// Parsea los parámetros `a` y `b`
    ///
    /// # Ejemplo
    /// ```
    /// use stats_server::handlers::calc::CalcQuery;
    ///
    /// let query = CalcQuery::parse("b=4&a=3");
    /// assert_eq!((query.a, query.b), (3, 4));
    /// assert_eq!(CalcQuery::parse("band=5").a, 0);
    /// ```
    pub fn parse(query: &str) -> Self {
        Self {
            a: param(query, "a").map(parse_leading_int).unwrap_or(0),
            b: param(query, "b").map(parse_leading_int).unwrap_or(0),
        }
    }

    /// Suma exacta de los operandos
    pub fn sum(&self) -> i64 {
        i64::from(self.a) + i64::from(self.b)
    }
}

/// Handler para `/calc`
///
/// # Ejemplo de body
/// ```text
/// <html><body><h1>Calculation Result</h1><p>3 + 4 = 7</p></body></html>
/// ```
pub fn calc_handler(query: &str) -> Response {
    let calc = CalcQuery::parse(query);
    let body = format!(
        "<html><body><h1>Calculation Result</h1><p>{} + {} = {}</p></body></html>",
        calc.a,
        calc.b,
        calc.sum()
    );

    Response::html(&body)
}

/// Valor de la primera aparición de `key` (sin `=` el valor es vacío)
fn param<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        (name == key).then_some(value)
    })
}

/// Signo opcional y dígitos decimales; se detiene en el primer no-dígito
fn parse_leading_int(value: &str) -> i32 {
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let mut magnitude: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        magnitude = magnitude * 10 + i64::from(digit - b'0');
        // Más allá de este punto el resultado ya está saturado.
        if magnitude > i64::from(i32::MAX) + 1 {
            break;
        }
    }

    let signed = if negative { -magnitude } else { magnitude };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(response: &Response) -> String {
        String::from_utf8(response.body().to_vec()).unwrap()
    }

    #[test]
    fn test_simple_sum() {
        let response = calc_handler("a=3&b=4");
        assert!(body(&response).contains("3 + 4 = 7"));
        assert_eq!(response.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_negative_operand() {
        assert!(body(&calc_handler("a=-5&b=2")).contains("-5 + 2 = -3"));
    }

    #[test]
    fn test_empty_query() {
        assert!(body(&calc_handler("")).contains("0 + 0 = 0"));
    }

    #[test]
    fn test_full_body_format() {
        assert_eq!(
            body(&calc_handler("a=1&b=1")),
            "<html><body><h1>Calculation Result</h1><p>1 + 1 = 2</p></body></html>"
        );
    }

    #[test]
    fn test_whole_key_match_only() {
        assert_eq!(CalcQuery::parse("band=5&b=2"), CalcQuery { a: 0, b: 2 });
        assert_eq!(CalcQuery::parse("alpha=9"), CalcQuery::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(CalcQuery::parse("a=1&a=2&b=3").a, 1);
    }

    #[test]
    fn test_missing_or_garbage_values_default_to_zero() {
        assert_eq!(CalcQuery::parse("a=&b=x"), CalcQuery::default());
        assert_eq!(CalcQuery::parse("a&b"), CalcQuery::default());
        assert_eq!(CalcQuery::parse("a=-&b=+"), CalcQuery::default());
    }

    #[test]
    fn test_stops_at_first_non_digit() {
        assert_eq!(CalcQuery::parse("a=12abc&b=+7.5"), CalcQuery { a: 12, b: 7 });
    }

    #[test]
    fn test_out_of_range_saturates() {
        let query = CalcQuery::parse("a=99999999999999999999&b=-99999999999");
        assert_eq!(query.a, i32::MAX);
        assert_eq!(query.b, i32::MIN);
    }

    #[test]
    fn test_sum_does_not_overflow() {
        let query = CalcQuery::parse("a=2147483647&b=2147483647");
        assert_eq!(query.sum(), 4_294_967_294);
        assert!(body(&calc_handler("a=2147483647&b=1")).contains("2147483647 + 1 = 2147483648"));
    }

    #[test]
    fn test_i32_min_is_exact() {
        assert_eq!(CalcQuery::parse("a=-2147483648").a, i32::MIN);
    }
}
