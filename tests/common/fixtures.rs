//! Layers shaped like a typical service deployment: shipped defaults, a site
//! file and a user override.

pub const SHIPPED_DEFAULTS: &str = r#"<config>
  <properties>
    <db.host>localhost</db.host>
    <db.port>5432</db.port>
    <db.url>postgres://${db.host}:${db.port}/app</db.url>
  </properties>
  <!-- default HTTP listener -->
  <service id="http" port="8080" combine.children="append">
    <filter>gzip</filter>
  </service>
  <service id="jmx" combine.self="DEFAULTS">
    <port>9999</port>
  </service>
  <datasource combine.self="OVERRIDABLE">
    <url>${db.url}</url>
  </datasource>
  <logger level="info"/>
</config>"#;

pub const SITE: &str = r#"<config>
  <properties>
    <db.host>db.internal</db.host>
  </properties>
  <service id="http" port="80">
    <filter>auth</filter>
  </service>
  <datasource>
    <url>${oneof:${env.LAYERCONF_TEST_UNSET_URL},${db.url}}</url>
    <pool>20</pool>
  </datasource>
</config>"#;

pub const USER: &str = r#"<config>
  <logger combine.self="remove"/>
  <banner>Welcome to ${config.service.port}</banner>
</config>"#;
