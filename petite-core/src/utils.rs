//! Utility functions for bean naming and bean parameters

/// Naming convention utilities for bean names
pub mod naming {
    use crate::types::TypeDescriptor;

    /// Converts a PascalCase type name to camelCase for bean naming.
    ///
    /// # Examples
    ///
    /// ```
    /// use petite_core::utils::naming::to_camel_case;
    ///
    /// assert_eq!(to_camel_case("UserService"), "userService");
    /// assert_eq!(to_camel_case("A"), "a");
    /// assert_eq!(to_camel_case(""), "");
    /// ```
    pub fn to_camel_case(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => {
                let mut result = String::with_capacity(s.len());
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
                result
            }
        }
    }

    /// Default bean name for a type: its short name in camelCase.
    ///
    /// ```
    /// use petite_core::utils::naming::bean_name_of;
    ///
    /// struct UserRepository;
    /// assert_eq!(bean_name_of::<UserRepository>(), "userRepository");
    /// ```
    pub fn bean_name_of<T: ?Sized + 'static>() -> String {
        to_camel_case(TypeDescriptor::of::<T>().short_name())
    }
}

/// Bean parameters are flat `"<bean name>.<key>"` strings
pub mod params {
    /// Builds the parameter key for a bean property.
    pub fn param_key(bean_name: &str, key: &str) -> String {
        format!("{}.{}", bean_name, key)
    }

    /// Selects the parameters that belong to `bean_name`, keeping their order.
    ///
    /// ```
    /// use petite_core::utils::params::params_for;
    ///
    /// let all = ["userService.timeout", "userServiceCache.size", "userService.retries"];
    /// assert_eq!(
    ///     params_for("userService", all),
    ///     vec!["userService.timeout", "userService.retries"]
    /// );
    /// ```
    pub fn params_for<I, S>(bean_name: &str, params: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        params
            .into_iter()
            .filter(|p| {
                p.as_ref()
                    .strip_prefix(bean_name)
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .map(|p| p.as_ref().to_string())
            .collect()
    }
}
