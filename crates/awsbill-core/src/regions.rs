/// Region code used when `product/location` is empty or not recognised.
pub const NO_REGION: &str = "noregion";

/// Map the human-readable `product/location` value of a billing row to the
/// short AWS region code, e.g. `"US East (N. Virginia)"` → `"us-east-1"`.
///
/// Returns `None` for locations that are not in the table. Callers that want
/// the metric-name form should use [`normalize_region`] instead.
pub fn region_code(location: &str) -> Option<&'static str> {
    let code = match location {
        "US East (N. Virginia)" => "us-east-1",
        "US East (Ohio)" => "us-east-2",
        "US West (N. California)" => "us-west-1",
        "US West (Oregon)" => "us-west-2",
        "AWS GovCloud (US)" => "us-gov-west-1",
        "Canada (Central)" => "ca-central-1",
        "EU (Ireland)" => "eu-west-1",
        "EU (London)" => "eu-west-2",
        "EU (Paris)" => "eu-west-3",
        "EU (Frankfurt)" => "eu-central-1",
        "EU (Stockholm)" => "eu-north-1",
        "Asia Pacific (Tokyo)" => "ap-northeast-1",
        "Asia Pacific (Seoul)" => "ap-northeast-2",
        "Asia Pacific (Osaka-Local)" => "ap-northeast-3",
        "Asia Pacific (Singapore)" => "ap-southeast-1",
        "Asia Pacific (Sydney)" => "ap-southeast-2",
        "Asia Pacific (Mumbai)" => "ap-south-1",
        "South America (Sao Paulo)" => "sa-east-1",
        _ => return None,
    };
    Some(code)
}

/// Like [`region_code`], but unknown locations degrade to [`NO_REGION`].
pub fn normalize_region(location: &str) -> &'static str {
    region_code(location).unwrap_or(NO_REGION)
}
